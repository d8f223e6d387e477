use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use tracing::debug;

use crate::app::{Result, SnagError};
use crate::config::FetchConfig;
use crate::fetcher::{FetchResult, Fetcher};

/// Single plain GET, no script execution, no retries.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.9"));

        // The client-level timeout aborts the in-flight request.
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SnagError::Timeout {
                    url: url.to_string(),
                    secs: self.timeout.as_secs(),
                }
            } else {
                SnagError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SnagError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), final_url);

        Ok(FetchResult {
            html,
            url: final_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a loopback port.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}/product/1", addr)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 21\r\nConnection: close\r\n\r\n<title>Kettle</title>",
        )
        .await;

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let result = fetcher.fetch(&url).await.unwrap();
        assert!(result.html.contains("<title>Kettle</title>"));
        assert_eq!(result.url, url);
    }

    #[tokio::test]
    async fn test_reports_url_after_redirect() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for _ in 0..2 {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut buf = [0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);

                let response = if request.starts_with("GET /start ") {
                    "HTTP/1.1 302 Found\r\nLocation: /final\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
                } else {
                    let body = "<title>Moved</title>";
                    format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    )
                };
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let result = fetcher.fetch(&format!("http://{}/start", addr)).await.unwrap();

        assert_eq!(result.url, format!("http://{}/final", addr));
        assert!(result.html.contains("<title>Moved</title>"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, SnagError::Status { status: 404, .. }));
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let result = fetcher.fetch(&format!("http://{}/", addr)).await;
        tokio_test::assert_err!(result);
    }

    #[tokio::test]
    async fn test_timeout_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and never answer.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let config = FetchConfig {
            timeout_secs: 1,
            ..FetchConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let err = fetcher.fetch(&format!("http://{}/", addr)).await.unwrap_err();
        assert!(matches!(err, SnagError::Timeout { secs: 1, .. }));
    }
}
