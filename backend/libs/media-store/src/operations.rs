/// S3 operations for media upload and deletion
use crate::config::MediaStoreConfig;
use crate::{MediaStoreError, Result};
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use rand::Rng;
use std::sync::Arc;

#[derive(Clone)]
pub struct MediaStore {
    client: Arc<Client>,
    config: MediaStoreConfig,
}

impl MediaStore {
    pub fn new(client: Arc<Client>, config: MediaStoreConfig) -> Self {
        Self { client, config }
    }

    /// Build a client from the ambient AWS environment.
    pub async fn from_env(config: MediaStoreConfig) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self {
            client: Arc::new(Client::new(&aws_config)),
            config,
        }
    }

    /// Object key for a URL this store previously returned, if any.
    pub fn key_for_url(&self, url: &str) -> Option<String> {
        self.config.key_for_url(url)
    }

    /// Build an object key under `folder`, prefixed so repeated uploads of
    /// the same file name never collide.
    pub fn object_key(folder: &str, file_name: &str) -> String {
        let unique_prefix: u32 = rand::thread_rng().gen_range(0..1_000_000);
        format!("{}/{}-{}", folder, unique_prefix, file_name)
    }

    /// Upload an object and return its public URL.
    pub async fn upload(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| MediaStoreError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(key, "uploaded object to media store");
        Ok(self.config.cdn_url(key))
    }

    /// Delete an object. Missing keys are not an error in S3.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| MediaStoreError::Delete {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_folder_and_name() {
        let key = MediaStore::object_key("avatars", "me.png");
        assert!(key.starts_with("avatars/"));
        assert!(key.ends_with("-me.png"));
    }

    #[test]
    fn object_keys_are_unlikely_to_collide() {
        let a = MediaStore::object_key("thumbnails", "t.jpg");
        let b = MediaStore::object_key("thumbnails", "t.jpg");
        // Random prefixes; equality would be a one-in-a-million event.
        assert_ne!(a, b);
    }
}
