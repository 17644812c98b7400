pub mod apify;

pub use apify::ApifyLeadSource;

use crate::models::Lead;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeadSourceError {
    #[error("APIFY_API_TOKEN is not set in the environment")]
    MissingToken,
    #[error("lead source request failed: {0}")]
    Request(String),
    #[error("unexpected lead source response: {0}")]
    BadResponse(String),
}

/// Boundary to the external directory that turns a search query into raw
/// business records.
#[async_trait]
pub trait LeadSource: Send + Sync {
    async fn fetch_leads(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Lead>, LeadSourceError>;
}
