use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StorageError;
use crate::settings::AppConfig;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// The `project-images` store: write-by-key with overwrite, public URL
/// derived from the key.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the bytes under `key`, overwriting any previous object,
    /// and returns the public URL.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError>;
}

/// An uploaded image, content type already sniffed and accepted.
#[derive(Debug)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

impl ImageUpload {
    /// Accepts raw upload bytes, enforcing the size cap and sniffing the
    /// content type. Only images pass.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, StorageError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(StorageError::PayloadTooLarge(format!(
                "Image exceeds {} bytes", MAX_IMAGE_BYTES
            )));
        }

        let kind = infer::get(&bytes).ok_or_else(|| {
            StorageError::UnsupportedContentType("Unrecognized file content".to_string())
        })?;

        if !kind.mime_type().starts_with("image/") {
            return Err(StorageError::UnsupportedContentType(format!(
                "Expected an image, got {}", kind.mime_type()
            )));
        }

        Ok(ImageUpload {
            bytes,
            extension: kind.extension(),
        })
    }

    /// Freshly generated unique storage key.
    pub fn generate_key(&self) -> String {
        format!("{}.{}", Uuid::new_v4(), self.extension)
    }
}

/// Filesystem-backed store. Keys map to files under `root`; the public
/// URL is `public_base`/`key`.
#[derive(Clone)]
pub struct FsImageStore {
    root: PathBuf,
    public_base: String,
}

impl FsImageStore {
    pub fn new(config: &AppConfig) -> Self {
        FsImageStore {
            root: PathBuf::from(&config.upload_dir),
            public_base: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(key), bytes).await?;

        Ok(format!("{}/{}", self.public_base, key))
    }
}
