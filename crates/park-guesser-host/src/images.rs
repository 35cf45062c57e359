//! Photo resolution for catalog entries.
//!
//! The catalog stores opaque image keys; something deployment-specific has
//! to turn them into URLs a browser can load. Object-store deployments sign
//! short-lived URLs per request, static deployments just join a base URL.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A displayable photo for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImage {
    /// URL the presentation layer can load directly.
    pub url: String,
    /// Seconds until the URL expires, for signed links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Turns a stored image key into a displayable URL.
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve(&self, image_key: &str) -> Result<ResolvedImage, ImageError>;
}

/// Errors raised while resolving photos.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Entry has no photo to resolve")]
    Missing,
    #[error("Image resolution failed: {0}")]
    Resolution(String),
}

/// Resolver that joins keys onto a fixed base URL.
///
/// Fits static hosting and CDN fronting, and doubles as the test resolver.
#[derive(Clone, Debug)]
pub struct StaticImageResolver {
    base_url: String,
}

impl StaticImageResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageResolver for StaticImageResolver {
    async fn resolve(&self, image_key: &str) -> Result<ResolvedImage, ImageError> {
        if image_key.is_empty() {
            return Err(ImageError::Missing);
        }

        Ok(ResolvedImage {
            url: format!("{}/{}", self.base_url, image_key.trim_start_matches('/')),
            expires_in: None,
        })
    }
}
