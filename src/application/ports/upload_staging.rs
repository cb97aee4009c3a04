use std::io;
use std::path::Path;

use tempfile::TempPath;

use crate::domain::UploadedDocument;

#[async_trait::async_trait]
pub trait UploadStaging: Send + Sync {
    /// Writes the upload to local disk so path-based remote clients can read it.
    async fn stage(&self, document: &UploadedDocument) -> Result<StagedFile, StagingError>;
}

/// A staged upload on local disk. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct StagedFile {
    path: TempPath,
}

impl StagedFile {
    pub fn new(path: TempPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file now and reports a failure instead of ignoring it.
    pub fn close(self) -> io::Result<()> {
        self.path.close()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("failed to stage upload {filename}: {source}")]
    WriteFailed {
        filename: String,
        #[source]
        source: io::Error,
    },
    #[error("staging task failed: {0}")]
    TaskFailed(String),
}
