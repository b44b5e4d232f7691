//! JIRA Agile board client

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::auth::JiraAuth;
use crate::types::{Board, BoardPage, IssuePage};
use crate::{Error, Result};

pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    auth: JiraAuth,
    page_size: u32,
}

impl JiraClient {
    pub fn new(
        base_url: String,
        auth: JiraAuth,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            page_size,
        })
    }

    /// List the boards visible to the configured account.
    pub async fn list_boards(&self) -> Result<Vec<Board>> {
        let response = self
            .http
            .get(&self.base_url)
            .header("Authorization", self.auth.to_basic_auth())
            .header("Accept", "application/json")
            .send()
            .await?;

        let page: BoardPage = Self::parse_success(response).await?;
        info!(total = page.total, "fetched board list");

        Ok(page.values)
    }

    /// Fetch every issue on a board, walking the paginated endpoint until the
    /// reported total is reached.
    ///
    /// The offset advances by the number of issues each page actually
    /// returned, so short pages are tolerated. A page that returns nothing
    /// while issues remain would loop forever; that case fails with
    /// [`Error::Pagination`] instead. An empty board yields `Ok(vec![])`.
    pub async fn board_issues(&self, board_id: u64) -> Result<Vec<Value>> {
        let issue_url = format!("{}/{}/issue", self.base_url, board_id);

        let mut all_issues: Vec<Value> = Vec::new();
        let mut start_at: u64 = 0;

        loop {
            let response = self
                .http
                .get(&issue_url)
                .query(&[
                    ("maxResults", u64::from(self.page_size)),
                    ("startAt", start_at),
                ])
                .header("Authorization", self.auth.to_basic_auth())
                .header("Accept", "application/json")
                .send()
                .await?;

            let page: IssuePage = Self::parse_success(response).await?;
            let count = page.issues.len() as u64;

            if count == 0 && start_at < page.total {
                return Err(Error::Pagination(format!(
                    "empty page at offset {} with {} issues reported",
                    start_at, page.total
                )));
            }

            all_issues.extend(page.issues);

            if start_at + count >= page.total {
                break;
            }

            start_at += count;
            debug!(fetched = start_at, total = page.total, "fetching next page");
        }

        info!(count = all_issues.len(), board_id, "fetched board issues");

        Ok(all_issues)
    }

    async fn parse_success<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(Error::Api { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
