//! HTTP adapter behind the `UpstreamFetcher` port.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scoreline::domain::{FetchedBytes, UpstreamRequest};
use scoreline::ports::UpstreamFetcher;
use serde_json::Value;
use shared::{Error, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Shared reqwest client; per-call timeout and headers come from the request
#[derive(Clone, Debug)]
pub struct ReqwestFetcher {
    http_client: Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        let http_client = Client::builder()
            .pool_max_idle_per_host(10)
            .tcp_nodelay(true)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build http client: {e}")))?;

        Ok(Self { http_client })
    }

    async fn send(&self, request: &UpstreamRequest) -> Result<reqwest::Response> {
        let mut builder = self
            .http_client
            .get(&request.url)
            .timeout(request.timeout);
        for (name, value) in request.profile.headers() {
            builder = builder.header(*name, *value);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "upstream request failed");
            Error::Upstream(format!("{}: {e}", request.url))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %request.url, status = status.as_u16(), "upstream returned an error status");
            return Err(Error::UpstreamStatus {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

/// Reads chunk by chunk and gives up as soon as the body passes `limit`
async fn read_capped(
    mut response: reqwest::Response,
    request: &UpstreamRequest,
    limit: usize,
) -> Result<Bytes> {
    let too_large = |size: u64| {
        warn!(url = %request.url, size, limit, "upstream body too large");
        Error::Upstream(format!("{}: body exceeds {limit} bytes", request.url))
    };

    if let Some(declared) = response.content_length() {
        if declared > limit as u64 {
            return Err(too_large(declared));
        }
    }

    let mut body = BytesMut::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| {
        warn!(url = %request.url, error = %e, "upstream body read failed");
        Error::Upstream(format!("{}: {e}", request.url))
    })? {
        if body.len() + chunk.len() > limit {
            return Err(too_large((body.len() + chunk.len()) as u64));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

#[async_trait]
impl UpstreamFetcher for ReqwestFetcher {
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<Value> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "upstream body read failed");
            Error::Upstream(format!("{}: {e}", request.url))
        })?;

        let value = serde_json::from_slice(&body).map_err(|e| {
            warn!(url = %request.url, error = %e, "upstream body is not json");
            Error::Decode(format!("{}: {e}", request.url))
        })?;
        debug!(url = %request.url, size = body.len(), "fetched json");
        Ok(value)
    }

    async fn fetch_bytes(&self, request: &UpstreamRequest) -> Result<FetchedBytes> {
        let response = self.send(request).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = match request.max_body {
            Some(limit) => read_capped(response, request, limit).await?,
            None => response.bytes().await.map_err(|e| {
                warn!(url = %request.url, error = %e, "upstream body read failed");
                Error::Upstream(format!("{}: {e}", request.url))
            })?,
        };

        Ok(FetchedBytes {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use scoreline::policy::HeaderProfile;

    fn request(url: String, profile: HeaderProfile) -> UpstreamRequest {
        UpstreamRequest::new(url, profile, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_fetch_json_sends_browser_headers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/sport/football/events/live")
            .match_header("referer", "https://www.sofascore.com/")
            .match_header("origin", "https://www.sofascore.com")
            .match_header("user-agent", Matcher::Regex("Mozilla".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"events":[]}"#)
            .create_async()
            .await;

        let fetcher = ReqwestFetcher::new().unwrap();
        let value = fetcher
            .fetch_json(&request(
                format!("{}/sport/football/events/live", server.url()),
                HeaderProfile::Browser,
            ))
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!({"events": []}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generic_profile_sends_no_referer() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/scoreboard")
            .match_header("referer", Matcher::Missing)
            .match_header("user-agent", Matcher::Regex("^scoreline/".to_string()))
            .with_status(200)
            .with_body(r#"{"events":[]}"#)
            .create_async()
            .await;

        let fetcher = ReqwestFetcher::new().unwrap();
        fetcher
            .fetch_json(&request(
                format!("{}/scoreboard", server.url()),
                HeaderProfile::Generic,
            ))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/team/1/players")
            .with_status(403)
            .create_async()
            .await;

        let fetcher = ReqwestFetcher::new().unwrap();
        let result = fetcher
            .fetch_json(&request(
                format!("{}/team/1/players", server.url()),
                HeaderProfile::Browser,
            ))
            .await;

        assert!(matches!(
            result,
            Err(Error::UpstreamStatus { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/scoreboard")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let fetcher = ReqwestFetcher::new().unwrap();
        let result = fetcher
            .fetch_json(&request(
                format!("{}/scoreboard", server.url()),
                HeaderProfile::Generic,
            ))
            .await;

        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_upstream_error() {
        let fetcher = ReqwestFetcher::new().unwrap();
        let result = fetcher
            .fetch_json(&request(
                "http://127.0.0.1:1/nothing".to_string(),
                HeaderProfile::Generic,
            ))
            .await;

        assert!(matches!(result, Err(Error::Upstream(_))));
    }

    #[tokio::test]
    async fn test_fetch_bytes_keeps_content_type() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/team/42/image")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(b"\x89PNG-bytes")
            .create_async()
            .await;

        let fetcher = ReqwestFetcher::new().unwrap();
        let fetched = fetcher
            .fetch_bytes(&request(
                format!("{}/team/42/image", server.url()),
                HeaderProfile::Browser,
            ))
            .await
            .unwrap();

        assert_eq!(fetched.content_type.as_deref(), Some("image/png"));
        assert_eq!(&fetched.bytes[..], b"\x89PNG-bytes");
    }

    #[tokio::test]
    async fn test_fetch_bytes_enforces_body_cap() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/huge.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(vec![0u8; 4096])
            .create_async()
            .await;

        let fetcher = ReqwestFetcher::new().unwrap();
        let url = format!("{}/huge.png", server.url());

        let capped = fetcher
            .fetch_bytes(&request(url.clone(), HeaderProfile::Browser).with_max_body(1024))
            .await;
        assert!(matches!(capped, Err(Error::Upstream(_))));

        let roomy = fetcher
            .fetch_bytes(&request(url, HeaderProfile::Browser).with_max_body(8192))
            .await
            .unwrap();
        assert_eq!(roomy.bytes.len(), 4096);
    }
}
