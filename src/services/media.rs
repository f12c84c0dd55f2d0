//! Media lifecycle management
//!
//! Uploaded images live on local disk under the public directory, one
//! sub-directory per kind. Files are named by their owner's public id plus the
//! SHA-256 of their content, so a file belongs to exactly one row and
//! re-uploading the same bytes for that row keeps the name. Disk and database are never
//! updated atomically: replace writes the new file, persists the reference,
//! then removes the old file; a failed persist removes the new file again.
//! A crash between those steps can leave an orphaned file behind.

use std::future::Future;
use std::path::{Path, PathBuf};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use tokio::fs;
use tracing::{debug, warn};
use crate::config::MediaConfig;
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::logging::log_media_operation;

/// Kinds of uploaded media, each stored in its own directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    ProfilePhoto,
    CoverPhoto,
    MentorPhoto,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::ProfilePhoto, MediaKind::CoverPhoto, MediaKind::MentorPhoto];

    /// Directory relative to the public root, also the public URL prefix
    pub fn directory(&self) -> &'static str {
        match self {
            MediaKind::ProfilePhoto => "profiles",
            MediaKind::CoverPhoto => "covers",
            MediaKind::MentorPhoto => "images/mentors",
        }
    }
}

/// An uploaded file as received from a multipart form
#[derive(Debug, Clone)]
pub struct Upload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Lowercased extension including the leading dot
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
    }
}

/// Build an upload from a multipart file part. Browsers send a part with an
/// empty file name and no bytes when no file was chosen; that yields `None`.
pub fn non_empty_upload(original_name: String, bytes: Vec<u8>) -> Option<Upload> {
    if original_name.is_empty() && bytes.is_empty() {
        return None;
    }
    Some(Upload { original_name, bytes })
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    max_bytes: usize,
    allowed_extensions: Vec<String>,
}

impl MediaStore {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: PathBuf::from(&config.public_dir),
            max_bytes: config.max_upload_bytes,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    /// Create the per-kind directories
    pub async fn ensure_directories(&self) -> Result<()> {
        for kind in MediaKind::ALL {
            fs::create_dir_all(self.root.join(kind.directory())).await?;
        }
        Ok(())
    }

    pub fn path_for(&self, kind: MediaKind, file_name: &str) -> PathBuf {
        self.root.join(kind.directory()).join(file_name)
    }

    /// Public URL path for a stored file, e.g. `/profiles/<hash>.png`
    pub fn public_path(kind: MediaKind, file_name: &str) -> String {
        format!("/{}/{}", kind.directory(), file_name)
    }

    /// Check the upload against the extension allow-list and size limit,
    /// returning the extension to use
    pub fn validate(&self, upload: &Upload) -> Result<String> {
        if upload.bytes.is_empty() {
            return Err(ScholarHubError::validation("No file was uploaded"));
        }

        let extension = upload
            .extension()
            .filter(|ext| self.allowed_extensions.contains(ext))
            .ok_or_else(|| ScholarHubError::InvalidUpload("Invalid file type".to_string()))?;

        if upload.bytes.len() > self.max_bytes {
            return Err(ScholarHubError::InvalidUpload(format!(
                "Image must be smaller than {} bytes",
                self.max_bytes
            )));
        }

        Ok(extension)
    }

    /// `<owner>-<sha256 of bytes><extension>`
    pub fn file_name_for(owner: Uuid, bytes: &[u8], extension: &str) -> String {
        let digest = Sha256::digest(bytes);
        format!("{}-{}{}", owner, hex::encode(digest), extension)
    }

    /// Validate and write an upload for `owner`, returning the stored file name
    pub async fn store(&self, kind: MediaKind, owner: Uuid, upload: &Upload) -> Result<String> {
        let extension = self.validate(upload)?;
        let file_name = Self::file_name_for(owner, &upload.bytes, &extension);
        let path = self.path_for(kind, &file_name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        match fs::write(&path, &upload.bytes).await {
            Ok(()) => {
                log_media_operation("store", &path.to_string_lossy(), true);
                Ok(file_name)
            }
            Err(e) => {
                log_media_operation("store", &path.to_string_lossy(), false);
                Err(e.into())
            }
        }
    }

    /// Best-effort removal; a missing file is logged, not an error
    pub async fn remove(&self, kind: MediaKind, file_name: &str) -> bool {
        let path = self.path_for(kind, file_name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                log_media_operation("remove", &path.to_string_lossy(), true);
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Media file to remove was not found");
                false
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove media file");
                log_media_operation("remove", &path.to_string_lossy(), false);
                false
            }
        }
    }

    /// Two-phase replace: write the new file, run `persist` with its name,
    /// then drop the previous file. When `persist` fails the new file is
    /// removed again and the error returned; the previous file is untouched.
    pub async fn replace<T, F, Fut>(
        &self,
        kind: MediaKind,
        owner: Uuid,
        previous: Option<&str>,
        upload: &Upload,
        persist: F,
    ) -> Result<(String, T)>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let new_name = self.store(kind, owner, upload).await?;

        let outcome = match persist(new_name.clone()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if previous != Some(new_name.as_str()) {
                    debug!(file_name = %new_name, "Persist failed, removing newly written media");
                    self.remove(kind, &new_name).await;
                }
                return Err(e);
            }
        };

        if let Some(previous) = previous.filter(|prev| *prev != new_name) {
            self.remove(kind, previous).await;
        }

        Ok((new_name, outcome))
    }

    /// Clear a reference via `persist`, then remove the file it pointed to
    pub async fn delete<T, F, Fut>(&self, kind: MediaKind, current: Option<&str>, persist: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let outcome = persist().await?;
        if let Some(current) = current {
            self.remove(kind, current).await;
        }
        Ok(outcome)
    }
}
