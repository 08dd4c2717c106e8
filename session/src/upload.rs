//! Upload Selection: one zip bundle bound for a project's frontend or backend.
//!
//! Validation happens here, before any bytes leave the machine; a selection
//! that constructs successfully is always submittable.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::transport::{FormPart, FormValue, RequestBody};

pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Which half of the project a bundle replaces. Fixed for the lifetime of one
/// upload modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadTarget {
    Frontend,
    Backend,
}

impl UploadTarget {
    /// Wire value of the `fileType` form field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
        }
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadTarget {
    type Err = ClientError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            other => Err(ClientError::InvalidSelection(format!("unknown upload target `{other}`"))),
        }
    }
}

/// A locally chosen file and its contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Validated single-file upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadSelection {
    file: SelectedFile,
    target: UploadTarget,
    project_id: String,
}

/// Reject anything that is not named like a zip archive.
///
/// # Errors
///
/// Returns [`ClientError::InvalidSelection`] for names without a `.zip` extension.
pub fn validate_file_name(name: &str) -> Result<(), ClientError> {
    let lower = name.trim().to_ascii_lowercase();
    let has_stem = lower.len() > ".zip".len();
    if has_stem && lower.ends_with(".zip") {
        Ok(())
    } else {
        Err(ClientError::InvalidSelection(format!("{name} is not a .zip archive")))
    }
}

/// Backend path for uploading into `project_id`.
#[must_use]
pub fn upload_endpoint(project_id: &str) -> String {
    format!("file/{}/upload", urlencoding::encode(project_id))
}

impl UploadSelection {
    /// Validate a file picker result.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidSelection`] unless exactly one `.zip`
    /// file was chosen for a non-empty project id.
    pub fn new(files: Vec<SelectedFile>, target: UploadTarget, project_id: &str) -> Result<Self, ClientError> {
        if project_id.trim().is_empty() {
            return Err(ClientError::InvalidSelection("missing project id".to_owned()));
        }
        let mut files = files.into_iter();
        let (Some(file), None) = (files.next(), files.next()) else {
            return Err(ClientError::InvalidSelection("select exactly one .zip file".to_owned()));
        };
        validate_file_name(&file.name)?;
        Ok(Self { file, target, project_id: project_id.trim().to_owned() })
    }

    #[must_use]
    pub fn target(&self) -> UploadTarget {
        self.target
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file.name
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.file.bytes.len()
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        upload_endpoint(&self.project_id)
    }

    /// Multipart body with the `file` and `fileType` fields.
    #[must_use]
    pub fn into_body(self) -> RequestBody {
        RequestBody::Multipart(vec![
            FormPart {
                name: "file".to_owned(),
                value: FormValue::File {
                    file_name: self.file.name,
                    content_type: ZIP_CONTENT_TYPE.to_owned(),
                    bytes: self.file.bytes,
                },
            },
            FormPart::text("fileType", self.target.as_str()),
        ])
    }
}

/// Human-readable byte count, e.g. `1.5 KB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024 && unit < UNITS.len() - 1 {
        value /= 1024;
        unit += 1;
    }
    if unit == 0 {
        return format!("{bytes} Bytes");
    }
    #[allow(clippy::cast_precision_loss)]
    let scaled = bytes as f64 / 1024_f64.powi(i32::try_from(unit).unwrap_or(0));
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}
