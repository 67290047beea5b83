use log::{info, warn};

use crate::auth::Credentials;
use crate::error::Result;
use crate::issues::RawIssue;

use super::client::JiraClient;

/// Progress reported once the first search page has arrived.
pub const CONNECTED: f64 = 10.0;
/// Progress reported once every page has been fetched.
pub const FETCHED: f64 = 30.0;

/// Jira issue source.
///
/// Runs a JQL search and returns every matching issue. Fetching finishes
/// before any processing starts.
pub struct JiraProvider {
    pub client: JiraClient,
    pub jql: String,
    pub page_size: usize,
}

impl JiraProvider {
    /// Creates a provider for the given server and query.
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        server: &str,
        credentials: Option<Credentials>,
        jql: String,
        page_size: usize,
    ) -> Result<Self> {
        let client = JiraClient::new(server, credentials)?;
        Ok(Self {
            client,
            jql,
            page_size,
        })
    }

    /// Human-readable description of where the issues came from.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.client.search_url.origin().ascii_serialization(), self.jql)
    }

    /// Fetches all issues matching the configured JQL.
    ///
    /// `progress` receives [`CONNECTED`] when the first page answers and
    /// [`FETCHED`] once the remaining pages are in.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails after retries or the response
    /// cannot be parsed.
    pub async fn fetch_issues<F>(&self, mut progress: F) -> Result<Vec<RawIssue>>
    where
        F: FnMut(f64),
    {
        info!("Searching Jira issues: {}", self.jql);
        let page_size = self.page_size.max(1);

        let first = self.client.search_page(&self.jql, 0, page_size).await?;
        info!("Connected, {} issues match", first.total);
        progress(CONNECTED);

        let issues = self
            .client
            .fetch_remaining(&self.jql, page_size, first)
            .await?;
        progress(FETCHED);

        if issues.is_empty() {
            warn!("No issues matched query: {}", self.jql);
        }
        info!("Fetched {} issues from Jira", issues.len());

        Ok(issues)
    }
}
