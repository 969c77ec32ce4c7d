mod http;
mod local;

pub use http::HttpProbe;
pub use local::LocalFileProbe;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

/// Trait for resolving the total size of a resource that Range headers apply to
#[async_trait]
pub trait SizeProbe: Send + Sync {
    /// Fetch the size of the resource in bytes
    async fn content_length(&self) -> Result<u64>;

    /// Human-readable name of the resource, for messages
    fn describe(&self) -> String;
}

/// Convert a probed size into the signed size the parser works with
pub fn to_parser_size(size: u64) -> Result<i64> {
    i64::try_from(size).map_err(|_| anyhow!("Resource size {} is too large", size))
}
