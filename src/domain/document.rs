use std::path::Path;

use bytes::Bytes;
use uuid::Uuid;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadId(Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Docx,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Browsers often send `application/octet-stream` for DOCX, so the extension is the fallback.
    pub fn detect(filename: &str, mime: Option<&str>) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| Self::from_filename(filename))
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => DOCX_MIME,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// A single file received from the upload form, held in memory until it is staged.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub id: UploadId,
    pub filename: String,
    pub content_type: ContentType,
    pub data: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: String, content_type: ContentType, data: Bytes) -> Self {
        Self {
            id: UploadId::new(),
            filename,
            content_type,
            data,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}
