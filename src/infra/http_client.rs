use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, instrument};

use crate::app::ports::FeedFetcher;
use crate::error::{Result, SyncError};

const USER_AGENT: &str = concat!("clash_group_sync/", env!("CARGO_PKG_VERSION"));

pub struct ReqwestFeedFetcher {
    client: Client,
}

impl ReqwestFeedFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl FeedFetcher for ReqwestFeedFetcher {
    #[instrument(skip(self))]
    fn fetch(&self, url: &str, timeout: Duration) -> Result<String> {
        let resp = self.client.get(url).timeout(timeout).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text()?;
        debug!(bytes = body.len(), "Fetched feed");
        Ok(body)
    }
}
