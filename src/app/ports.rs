use std::time::Duration;

use crate::error::Result;

/// Blocking fetch of the node feed. The network adapter lives in `infra`;
/// tests substitute an in-memory implementation.
pub trait FeedFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String>;
}
