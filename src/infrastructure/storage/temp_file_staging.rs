use std::io::Write;
use std::path::PathBuf;

use bytes::Bytes;

use crate::application::ports::{StagedFile, StagingError, UploadStaging};
use crate::domain::UploadedDocument;

const PREFIX: &str = "upload-";
const MAX_NAME_LEN: usize = 64;

/// Stages uploads as uniquely named temporary files under `dir`.
pub struct TempFileStaging {
    dir: PathBuf,
}

impl TempFileStaging {
    pub fn new(dir: PathBuf) -> Result<Self, StagingError> {
        std::fs::create_dir_all(&dir).map_err(|source| StagingError::WriteFailed {
            filename: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait::async_trait]
impl UploadStaging for TempFileStaging {
    async fn stage(&self, document: &UploadedDocument) -> Result<StagedFile, StagingError> {
        let dir = self.dir.clone();
        let filename = document.filename.clone();
        let suffix = format!(
            "-{}.{}",
            sanitize_filename(&document.filename),
            document.content_type.extension()
        );
        let data: Bytes = document.data.clone();

        let path = tokio::task::spawn_blocking(move || {
            let mut file = tempfile::Builder::new()
                .prefix(PREFIX)
                .suffix(&suffix)
                .tempfile_in(&dir)?;
            file.write_all(&data)?;
            file.flush()?;
            Ok::<_, std::io::Error>(file.into_temp_path())
        })
        .await
        .map_err(|e| StagingError::TaskFailed(e.to_string()))?
        .map_err(|source| StagingError::WriteFailed { filename, source })?;

        tracing::debug!(path = %path.display(), "Upload staged");
        Ok(StagedFile::new(path))
    }
}

/// Keeps the file stem readable in the temp name while dropping path separators and
/// anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_filename(filename: &str) -> String {
    let stem = std::path::Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}
