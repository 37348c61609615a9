use crate::config::Config;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use domain::candidate::CandidateRecord;
use domain::ports::DirectorySearch;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use shared::types::Result;
use shared::utils::preview;
use std::sync::Arc;
use tracing::{debug, error};

/// Public ORCID registry search.
#[derive(Clone)]
pub struct OrcidClient {
    client: Arc<Client>,
    base_url: String,
}

impl OrcidClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(Arc::new(Client::new()), config)
    }

    pub fn with_client(client: Arc<Client>, config: &Config) -> Self {
        Self {
            client,
            base_url: config.orcid_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/search/", self.base_url)
    }
}

/// Pull the result list out of a search response. A `null` or absent
/// `result` means zero matches.
pub fn parse_search_results(body: Value) -> Result<Vec<CandidateRecord>> {
    match body {
        Value::Object(mut map) => match map.remove("result") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.into_iter().map(CandidateRecord).collect()),
            Some(other) => Err(anyhow!("unexpected ORCID result field: {}", preview(&other.to_string(), 100))),
        },
        other => Err(anyhow!("unexpected ORCID response: {}", preview(&other.to_string(), 100))),
    }
}

#[async_trait]
impl DirectorySearch for OrcidClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CandidateRecord>> {
        let url = self.search_url();
        debug!(%url, query, limit, "searching ORCID");

        let rows = limit.to_string();
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("q", query), ("rows", rows.as_str())])
            .send()
            .await
            .context("ORCID API request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %preview(&body, 200), "ORCID API error");
            return Err(anyhow!("ORCID API request failed (status: {status})"));
        }

        let body: Value = response
            .json()
            .await
            .context("ORCID response is not valid JSON")?;
        parse_search_results(body)
    }
}
