//! Cookie + crumb session for the Yahoo JSON APIs.
//!
//! `quoteSummary` rejects requests without a session cookie and a matching
//! crumb. Both are fetched once, on first use, and reused for the rest of the
//! process. Failures are not retried.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use reqwest::blocking::Client;
use std::cell::RefCell;
use std::time::Duration;

const COOKIE_URL: &str = "https://fc.yahoo.com";

pub(crate) struct Session {
    client: Client,
    query_host: String,
    crumb: RefCell<Option<String>>,
}

impl Session {
    pub(crate) fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ScrapeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            query_host: config.query_host.trim_end_matches('/').to_string(),
            crumb: RefCell::new(None),
        })
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn query_host(&self) -> &str {
        &self.query_host
    }

    /// Crumb for authenticated endpoints, fetched on first call.
    pub(crate) fn crumb(&self) -> Result<String, ScrapeError> {
        if let Some(crumb) = self.crumb.borrow().as_ref() {
            return Ok(crumb.clone());
        }

        // The cookie host answers 404 but still sets the session cookie.
        self.client
            .get(COOKIE_URL)
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let url = format!("{}/v1/test/getcrumb", self.query_host);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Authentication(format!(
                "crumb request returned HTTP {status}"
            )));
        }

        let crumb = resp
            .text()
            .map_err(|e| ScrapeError::Network(e.to_string()))?
            .trim()
            .to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(ScrapeError::Authentication("empty or invalid crumb".into()));
        }

        tracing::debug!(len = crumb.len(), "obtained Yahoo crumb");
        *self.crumb.borrow_mut() = Some(crumb.clone());
        Ok(crumb)
    }
}
