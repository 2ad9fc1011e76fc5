/**
 * File Uploads
 *
 * Attachments are written under the upload directory as `<uuid><ext>`, where
 * `<ext>` is the extension of the client's file name (if any). The client's
 * name and declared MIME type are kept as metadata only.
 */
use std::path::Path;

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::FileInfo;

/// Largest accepted attachment (10 MiB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// A file received with a message
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name
    pub file_name: String,
    /// Client-declared MIME type
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Generate the stored name for `original`: a fresh UUID plus its extension
pub fn stored_file_name(original: &str) -> String {
    let extension = Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();
    format!("{}{}", Uuid::new_v4(), extension)
}

/// Reject files above [`MAX_FILE_SIZE`]
pub fn check_size(file: &UploadedFile) -> Result<(), BackendError> {
    if file.size() > MAX_FILE_SIZE {
        tracing::warn!(
            "Rejected upload {} of {} bytes (limit {})",
            file.file_name,
            file.size(),
            MAX_FILE_SIZE
        );
        return Err(BackendError::payload_too_large(
            "File size too large. Maximum size is 10MB.",
        ));
    }
    Ok(())
}

/// Write `file` into `dir` and describe where it went
pub async fn save_upload(dir: &Path, file: &UploadedFile) -> Result<FileInfo, BackendError> {
    check_size(file)?;

    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        tracing::error!("Failed to create upload directory {}: {}", dir.display(), e);
        BackendError::upload(e.to_string())
    })?;

    let path = dir.join(stored_file_name(&file.file_name));
    tokio::fs::write(&path, &file.bytes).await.map_err(|e| {
        tracing::error!("Failed to write upload {}: {}", path.display(), e);
        BackendError::upload(e.to_string())
    })?;

    tracing::info!("Stored upload {} ({} bytes) at {}", file.file_name, file.size(), path.display());

    Ok(FileInfo {
        path: path.to_string_lossy().into_owned(),
        name: file.file_name.clone(),
        size: file.size() as i64,
        content_type: file.content_type.clone(),
    })
}
