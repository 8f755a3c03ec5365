/// Media store configuration shared across services
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStoreConfig {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL for public access (CDN domain)
    pub base_url: String,
}

impl MediaStoreConfig {
    /// Load media store configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bucket: std::env::var("MEDIA_BUCKET").unwrap_or_else(|_| "vidtube-media".to_string()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            base_url: std::env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "https://s3.amazonaws.com".to_string()),
        }
    }

    /// Public CDN URL for a key
    pub fn cdn_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Object key for a URL previously returned by `cdn_url`. `None` for
    /// URLs not served by this store.
    pub fn key_for_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/", self.base_url);
        url.strip_prefix(&prefix)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MediaStoreConfig {
        MediaStoreConfig {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            base_url: "https://cdn.example.com".to_string(),
        }
    }

    #[test]
    fn cdn_url_joins_base_and_key() {
        let url = test_config().cdn_url("videos/clip.mp4");
        assert_eq!(url, "https://cdn.example.com/videos/clip.mp4");
    }

    #[test]
    fn key_for_url_inverts_cdn_url() {
        let config = test_config();
        let url = config.cdn_url("avatars/42-me.png");
        assert_eq!(
            config.key_for_url(&url).as_deref(),
            Some("avatars/42-me.png")
        );
    }

    #[test]
    fn key_for_url_rejects_foreign_urls() {
        let config = test_config();
        assert_eq!(config.key_for_url("https://elsewhere.example.com/a.png"), None);
        assert_eq!(config.key_for_url("https://cdn.example.com/"), None);
    }
}
