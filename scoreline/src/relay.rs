use crate::domain::UpstreamRequest;
use crate::policy::HeaderProfile;
use crate::ports::UpstreamFetcher;
use bytes::Bytes;
use shared::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// 1×1 fully transparent RGBA PNG
pub const TRANSPARENT_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, //
    0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, //
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, //
    0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x60, 0x00, 0x02, 0x00, //
    0x00, 0x05, 0x00, 0x01, 0xe9, 0xfa, 0xdc, 0xd8, 0x00, 0x00, 0x00, 0x00, //
    0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// Upper bound on a relayed image body
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const PLACEHOLDER_CONTENT_TYPE: &str = "image/png";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayedImage {
    pub bytes: Bytes,
    pub content_type: String,
    pub placeholder: bool,
}

impl RelayedImage {
    pub fn placeholder() -> Self {
        Self {
            bytes: Bytes::from_static(TRANSPARENT_PIXEL_PNG),
            content_type: PLACEHOLDER_CONTENT_TYPE.to_string(),
            placeholder: true,
        }
    }
}

/// Streams remote images through the proxy. Never cached here.
#[derive(Clone)]
pub struct ImageRelay {
    fetcher: Arc<dyn UpstreamFetcher>,
    timeout: Duration,
}

impl ImageRelay {
    pub fn new(fetcher: Arc<dyn UpstreamFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    pub async fn relay(&self, url: &str) -> RelayedImage {
        match self.try_relay(url).await {
            Ok(image) => image,
            Err(e) => {
                warn!(url, error = %e, "image relay failed, serving placeholder");
                RelayedImage::placeholder()
            }
        }
    }

    async fn try_relay(&self, url: &str) -> Result<RelayedImage> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let request = UpstreamRequest::new(parsed.as_str(), HeaderProfile::Browser, self.timeout)
            .with_max_body(MAX_IMAGE_BYTES);
        let fetched = self.fetcher.fetch_bytes(&request).await?;
        if fetched.bytes.is_empty() {
            return Err(Error::Upstream(format!("empty body from {url}")));
        }
        if fetched.bytes.len() > MAX_IMAGE_BYTES {
            return Err(Error::Upstream(format!(
                "{url}: body exceeds {MAX_IMAGE_BYTES} bytes"
            )));
        }
        // no header at all is tolerated; a declared non-image type is not
        if let Some(ct) = fetched.content_type.as_deref() {
            let ct = ct.trim();
            if !ct.is_empty() && !ct.to_ascii_lowercase().starts_with("image/") {
                return Err(Error::Upstream(format!("{url}: not an image ({ct})")));
            }
        }

        debug!(url, size = fetched.bytes.len(), "relayed image");
        Ok(RelayedImage {
            bytes: fetched.bytes,
            content_type: fetched
                .content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            placeholder: false,
        })
    }
}

impl std::fmt::Debug for ImageRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRelay")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FetchedBytes;
    use crate::testing::ScriptedFetcher;

    fn relay_with(fetcher: ScriptedFetcher) -> (ImageRelay, Arc<ScriptedFetcher>) {
        let fetcher = Arc::new(fetcher);
        (
            ImageRelay::new(fetcher.clone(), Duration::from_secs(5)),
            fetcher,
        )
    }

    #[test]
    fn test_placeholder_is_a_png() {
        let placeholder = RelayedImage::placeholder();
        assert!(placeholder.bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(placeholder.content_type, "image/png");
    }

    #[tokio::test]
    async fn test_relay_passes_bytes_through() {
        let (relay, fetcher) = relay_with(ScriptedFetcher::new().with_bytes(
            "https://img.example.com/logo.webp",
            FetchedBytes {
                bytes: Bytes::from_static(b"RIFFxxxxWEBP"),
                content_type: Some("image/webp".to_string()),
            },
        ));

        let image = relay.relay("https://img.example.com/logo.webp").await;

        assert!(!image.placeholder);
        assert_eq!(image.content_type, "image/webp");
        assert_eq!(&image.bytes[..], b"RIFFxxxxWEBP");
        assert_eq!(fetcher.calls_to("https://img.example.com/logo.webp"), 1);
        assert_eq!(fetcher.last_profile(), Some(HeaderProfile::Browser));
    }

    #[tokio::test]
    async fn test_relay_falls_back_on_failure() {
        let (relay, _) = relay_with(ScriptedFetcher::new());
        let image = relay.relay("https://img.example.com/missing.png").await;
        assert_eq!(image, RelayedImage::placeholder());
    }

    #[tokio::test]
    async fn test_relay_rejects_non_http_urls_without_fetching() {
        let (relay, fetcher) = relay_with(ScriptedFetcher::new());

        assert!(relay.relay("not a url").await.placeholder);
        assert!(relay.relay("file:///etc/passwd").await.placeholder);
        assert_eq!(fetcher.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_relay_refuses_non_image_responses() {
        let url = "https://img.example.com/login";
        let (relay, _) = relay_with(ScriptedFetcher::new().with_bytes(
            url,
            FetchedBytes {
                bytes: Bytes::from_static(b"<html>sign in</html>"),
                content_type: Some("text/html; charset=utf-8".to_string()),
            },
        ));

        assert_eq!(relay.relay(url).await, RelayedImage::placeholder());
    }

    #[tokio::test]
    async fn test_relay_refuses_oversized_bodies() {
        let url = "https://img.example.com/huge.png";
        let (relay, fetcher) = relay_with(ScriptedFetcher::new().with_bytes(
            url,
            FetchedBytes {
                bytes: Bytes::from(vec![0u8; MAX_IMAGE_BYTES + 1]),
                content_type: Some("image/png".to_string()),
            },
        ));

        assert!(relay.relay(url).await.placeholder);
        assert_eq!(fetcher.last_max_body(), Some(MAX_IMAGE_BYTES));
    }

    #[tokio::test]
    async fn test_relay_is_not_cached() {
        let url = "https://img.example.com/a.png";
        let (relay, fetcher) = relay_with(ScriptedFetcher::new().with_bytes(
            url,
            FetchedBytes {
                bytes: Bytes::from_static(b"png"),
                content_type: None,
            },
        ));

        relay.relay(url).await;
        let second = relay.relay(url).await;

        assert_eq!(second.content_type, "application/octet-stream");
        assert_eq!(fetcher.calls_to(url), 2);
    }
}
