use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::SizeProbe;
use anyhow::{Result, anyhow, bail};

/// Size probe for a remote resource, using a `HEAD` request
pub struct HttpProbe {
    client: Client,
    url: String,
    max_retry: u32,
}

impl HttpProbe {
    /// Create a new HTTP probe
    ///
    /// No request is sent until [`SizeProbe::content_length`] is called
    pub fn new(url: String, timeout: Duration, max_retry: u32) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url, max_retry))
    }

    /// Create a probe that sends its requests through an existing client
    pub fn with_client(client: Client, url: String, max_retry: u32) -> Self {
        Self {
            client,
            url,
            max_retry,
        }
    }
}

#[async_trait]
impl SizeProbe for HttpProbe {
    async fn content_length(&self) -> Result<u64> {
        let mut retry_count = 0;

        let resp = loop {
            match self.client.head(&self.url).send().await {
                Ok(resp) => break resp,
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        bail!("Max retries exceeded");
                    }
                    warn!(
                        url = %self.url,
                        retry = retry_count,
                        max_retry = self.max_retry,
                        error = %e,
                        "connection error, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        };

        if !resp.status().is_success() {
            bail!("HTTP request failed with status: {}", resp.status());
        }

        // Ranges still parse without it, the server just may ignore them
        let accept_ranges = resp
            .headers()
            .get("accept-ranges")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");

        if !accept_ranges.contains("bytes") {
            warn!(url = %self.url, accept_ranges, "remote server does not advertise byte ranges");
        }

        let size = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow!("Remote server did not return Content-Length"))?;

        debug!(url = %self.url, size, "probed remote resource size");

        Ok(size)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
