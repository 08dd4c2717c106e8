//! `fetch`-backed [`Transport`].
//!
//! Client-side (csr): real HTTP via `gloo-net`, raced against a
//! `gloo-timers` sleep so a hung request ends as a network failure.
//! Host builds: every send fails with [`ClientError::NetworkFailure`].
//!
//! ERROR HANDLING
//! ==============
//! Anything that prevents a response (request build, CORS, offline, timeout)
//! is a `NetworkFailure`. Any response at all, whatever its status, is handed
//! back for the API client to judge.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::future::Future;
use std::time::Duration;

use session::{ApiRequest, ApiResponse, ClientError, Transport};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ClientError>> {
        send(request)
    }
}

#[cfg(any(test, feature = "csr"))]
fn timeout_message(timeout: Duration) -> String {
    format!("no response within {}s", timeout.as_secs())
}

fn network_failure(err: impl std::fmt::Display) -> ClientError {
    ClientError::NetworkFailure(err.to_string())
}

#[cfg(feature = "csr")]
async fn send(request: ApiRequest) -> Result<ApiResponse, ClientError> {
    use futures::future::{Either, select};

    let timeout = request.timeout;
    let exchange = Box::pin(exchange(request));
    let deadline = Box::pin(gloo_timers::future::sleep(timeout));
    match select(exchange, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ClientError::NetworkFailure(timeout_message(timeout))),
    }
}

#[cfg(not(feature = "csr"))]
#[allow(clippy::unused_async)]
async fn send(request: ApiRequest) -> Result<ApiResponse, ClientError> {
    log::debug!("transport: {} {} has no browser to go through", request.method.as_str(), request.url);
    Err(network_failure("fetch is unavailable outside the browser"))
}

#[cfg(feature = "csr")]
async fn exchange(request: ApiRequest) -> Result<ApiResponse, ClientError> {
    use gloo_net::http::Request;
    use session::{Method, RequestBody};

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let outgoing = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
    }
    .map_err(network_failure)?;

    let response = outgoing.send().await.map_err(network_failure)?;
    let status = response.status();
    let body = response.text().await.map_err(network_failure)?;
    Ok(ApiResponse { status, body })
}

/// Multipart body as browser `FormData`; the browser writes the boundary.
#[cfg(feature = "csr")]
fn form_data(parts: Vec<session::FormPart>) -> Result<web_sys::FormData, ClientError> {
    use session::FormValue;

    let js_failure = |err: wasm_bindgen::JsValue| network_failure(format!("{err:?}"));
    let form = web_sys::FormData::new().map_err(js_failure)?;
    for part in parts {
        match part.value {
            FormValue::Text(text) => form.append_with_str(&part.name, &text),
            FormValue::File { file_name, content_type, bytes } => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&array), &options)
                    .map_err(js_failure)?;
                form.append_with_blob_and_filename(&part.name, &blob, &file_name)
            }
        }
        .map_err(js_failure)?;
    }
    Ok(form)
}
