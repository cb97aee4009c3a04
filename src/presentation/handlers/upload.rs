use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use crate::domain::{ContentType, UploadedDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    NoFile,
    EmptyFile,
    Malformed(String),
    UnsupportedType(String),
    TooLarge,
}

impl UploadRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadRejection::NoFile
            | UploadRejection::EmptyFile
            | UploadRejection::Malformed(_) => StatusCode::BAD_REQUEST,
            UploadRejection::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadRejection::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UploadRejection::NoFile => "No file uploaded".to_string(),
            UploadRejection::EmptyFile => "Uploaded file is empty".to_string(),
            UploadRejection::Malformed(e) => format!("Failed to read multipart: {e}"),
            UploadRejection::UnsupportedType(t) => {
                format!("Unsupported file type: {t}. Upload a PDF or DOCX document")
            }
            UploadRejection::TooLarge => "Uploaded file exceeds the size limit".to_string(),
        }
    }
}

/// Takes the first file field of the form. Non-file fields are skipped.
pub async fn read_upload(multipart: &mut Multipart) -> Result<UploadedDocument, UploadRejection> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => return Err(UploadRejection::NoFile),
            Err(e) => return Err(from_multipart_error(e)),
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(UploadRejection::NoFile);
        }

        let mime = field.content_type().map(str::to_string);
        tracing::debug!(filename = %filename, content_type = ?mime, "Processing file upload");

        let content_type = ContentType::detect(&filename, mime.as_deref()).ok_or_else(|| {
            UploadRejection::UnsupportedType(mime.clone().unwrap_or_else(|| filename.clone()))
        })?;

        let data = field.bytes().await.map_err(from_multipart_error)?;
        if data.is_empty() {
            return Err(UploadRejection::EmptyFile);
        }

        tracing::debug!(bytes = data.len(), "File data received");
        return Ok(UploadedDocument::new(filename, content_type, data));
    }
}

fn from_multipart_error(e: MultipartError) -> UploadRejection {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadRejection::TooLarge
    } else {
        UploadRejection::Malformed(e.body_text())
    }
}
