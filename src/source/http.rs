//! Reporting endpoint client.
//!
//! `GET {base}/today?users=..` returns `[TodayFact]`,
//! `GET {base}/day/YYYY-MM-DD?users=..` returns `[MarkedTimeRow]`.

use super::{FactSource, MarkedTimeRow, merge_marked_rows};
use crate::config::SourceConfig;
use crate::errors::{AppError, AppResult};
use crate::models::facts::{DayFact, TodayFact};
use crate::models::roster::RosterEntry;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub struct HttpFactSource {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    users: String,
}

impl HttpFactSource {
    pub fn new(cfg: &SourceConfig, roster: &[RosterEntry]) -> AppResult<Self> {
        let users = user_list(roster)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_token: cfg.api_token.clone().filter(|t| !t.is_empty()),
            users,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "fetching facts");

        let mut req = self.client.get(&url).query(&[("users", self.users.as_str())]);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Source(format!("{} returned {}", url, status)));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::Source(format!("malformed response from {}: {}", url, e)))
    }
}

/// Comma separated roster names sent with every request.
fn user_list(roster: &[RosterEntry]) -> AppResult<String> {
    if roster.is_empty() {
        return Err(AppError::Config(
            "user list must contain at least one user".into(),
        ));
    }
    Ok(roster
        .iter()
        .map(|u| u.last_name.as_str())
        .collect::<Vec<_>>()
        .join(","))
}

#[async_trait]
impl FactSource for HttpFactSource {
    async fn get_today(&self) -> AppResult<Vec<TodayFact>> {
        self.fetch("today").await
    }

    async fn get_for_day(&self, date: NaiveDate) -> AppResult<Vec<DayFact>> {
        let rows: Vec<MarkedTimeRow> = self
            .fetch(&format!("day/{}", date.format("%Y-%m-%d")))
            .await?;
        Ok(merge_marked_rows(&rows))
    }

    async fn close(&self) -> AppResult<()> {
        // reqwest drops pooled connections with the client
        Ok(())
    }
}
