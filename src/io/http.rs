use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::Resource;
use crate::error::{CapabilityError, ReadError};

/// Remote resource served over HTTP Range requests.
///
/// Transient connection errors are retried with backoff inside `fetch`;
/// that is a property of this host primitive, not of the reader above it,
/// which never retries.
pub struct HttpResource {
    client: Client,
    url: String,
    size: u64,
    accepts_ranges: bool,
    transferred_bytes: AtomicU64,
    max_retry: u32,
}

impl HttpResource {
    /// Probe `url` with a HEAD request, recording its total size and
    /// whether the server advertises byte-range support.
    pub async fn connect(url: String) -> Result<Self, CapabilityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CapabilityError::new(e.to_string()))?;

        let resp = client
            .head(&url)
            .send()
            .await
            .map_err(|e| CapabilityError::new(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CapabilityError::new(format!(
                "HEAD request failed with status {}",
                resp.status()
            )));
        }

        let accepts_ranges = resp
            .headers()
            .get("accept-ranges")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("bytes"));

        let size = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| CapabilityError::new("server did not return Content-Length"))?;

        Ok(Self {
            client,
            url,
            size,
            accepts_ranges,
            transferred_bytes: AtomicU64::new(0),
            max_retry: 10,
        })
    }

    /// Total bytes transferred from the network so far.
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Resource for HttpResource {
    fn validate(&self) -> Result<(), CapabilityError> {
        if !self.accepts_ranges {
            return Err(CapabilityError::new(
                "server does not support Range requests",
            ));
        }
        Ok(())
    }

    fn len(&self) -> u64 {
        self.size
    }

    async fn fetch(&self, offset: u64, length: u64) -> Result<Vec<u8>, ReadError> {
        if length == 0 {
            return Ok(Vec::new());
        }

        let end = offset + length - 1;
        let expected = length as usize;
        let mut buf = vec![0u8; expected];

        let mut received = 0;
        let mut retry_count = 0;

        while received < expected {
            let current_start = offset + received as u64;
            let range = format!("bytes={}-{}", current_start, end);

            let result = self
                .client
                .get(&self.url)
                .header("Range", &range)
                .send()
                .await;

            match result {
                Ok(resp) => {
                    if resp.status() != reqwest::StatusCode::PARTIAL_CONTENT {
                        return Err(ReadError::Transport(format!(
                            "range request failed with status {}",
                            resp.status()
                        )));
                    }

                    let bytes = resp
                        .bytes()
                        .await
                        .map_err(|e| ReadError::Transport(e.to_string()))?;
                    if bytes.is_empty() {
                        return Err(ReadError::Transport(
                            "server returned an empty range body".to_string(),
                        ));
                    }
                    let chunk_len = bytes.len().min(expected - received);
                    buf[received..received + chunk_len].copy_from_slice(&bytes[..chunk_len]);
                    received += chunk_len;

                    self.transferred_bytes
                        .fetch_add(chunk_len as u64, Ordering::Relaxed);
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        return Err(ReadError::Aborted("max retries exceeded".to_string()));
                    }
                    eprintln!(
                        "Connection error, retry {}/{}: {}",
                        retry_count, self.max_retry, e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(ReadError::Transport(e.to_string())),
            }
        }

        Ok(buf)
    }
}
