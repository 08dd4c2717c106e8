//! File picker glue: turns an `<input type="file">` change into
//! [`SelectedFile`]s for an upload selection.

use session::{ClientError, SelectedFile};
use wasm_bindgen::JsCast as _;

/// Files chosen in the input behind `ev`.
pub fn picked_files(ev: &leptos::ev::Event) -> Vec<web_sys::File> {
    let Some(input) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|index| list.item(index)).collect()
}

/// Load every file into memory, in picker order.
///
/// # Errors
///
/// Returns [`ClientError::InvalidSelection`] when the browser refuses to read one.
pub async fn read_files(files: Vec<web_sys::File>) -> Result<Vec<SelectedFile>, ClientError> {
    let mut selected = Vec::with_capacity(files.len());
    for file in files {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|err| ClientError::InvalidSelection(format!("could not read {}: {err:?}", file.name())))?;
        selected.push(SelectedFile { name: file.name(), bytes: js_sys::Uint8Array::new(&buffer).to_vec() });
    }
    Ok(selected)
}
