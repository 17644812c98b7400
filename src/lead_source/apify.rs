// src/lead_source/apify.rs
use crate::config::LeadSourceConfig;
use crate::lead_source::{LeadSource, LeadSourceError};
use crate::models::Lead;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

const TOKEN_ENV: &str = "APIFY_API_TOKEN";

/// Lead source backed by an Apify actor, run synchronously so the dataset
/// items come back in the same response.
pub struct ApifyLeadSource {
    client: Client,
    config: LeadSourceConfig,
}

impl ApifyLeadSource {
    pub fn new(config: LeadSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn run_url(&self) -> String {
        // Actor ids use '~' instead of '/' in API paths.
        format!(
            "{}/v2/acts/{}/run-sync-get-dataset-items",
            self.config.api_base.trim_end_matches('/'),
            self.config.actor.replace('/', "~")
        )
    }
}

#[async_trait]
impl LeadSource for ApifyLeadSource {
    async fn fetch_leads(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Lead>, LeadSourceError> {
        let token = std::env::var(TOKEN_ENV).map_err(|_| LeadSourceError::MissingToken)?;

        let input = serde_json::json!({
            "searchStrings": [query],
            "maxItems": max_results,
            "searchMode": "all",
            "language": self.config.language,
        });

        info!("Running actor {} for '{}'", self.config.actor, query);
        let response = self
            .client
            .post(self.run_url())
            .bearer_auth(&token)
            .query(&[("format", "json")])
            .timeout(Duration::from_secs(self.config.run_timeout_seconds))
            .json(&input)
            .send()
            .await
            .map_err(|e| LeadSourceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LeadSourceError::Request(format!(
                "actor run returned HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let items: Vec<PlaceItem> = response
            .json()
            .await
            .map_err(|e| LeadSourceError::BadResponse(e.to_string()))?;

        Ok(items.into_iter().map(Lead::from).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceItem {
    title: Option<String>,
    address: Option<String>,
    website: Option<String>,
    place_id: Option<String>,
}

impl From<PlaceItem> for Lead {
    fn from(item: PlaceItem) -> Self {
        Self {
            name: item
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "Unknown business".to_string()),
            address: item.address,
            website: item.website,
            email: None,
            phone: None,
            place_id: item.place_id,
        }
    }
}
