use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::jobs::{Job, JobStatus};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One discovered business, as returned by the lead source and later
/// enriched with contact details scraped from its website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub place_id: Option<String>,
}

impl Lead {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            website: None,
            email: None,
            phone: None,
            place_id: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize {
    20
}

#[derive(Debug, Serialize)]
pub struct ScrapeAccepted {
    pub task_id: Uuid,
}

/// Status snapshot returned by the polling endpoint.
#[derive(Debug, Serialize)]
pub struct ScrapeStatus {
    pub task_id: Uuid,
    pub status: JobStatus,
    pub progress: u8,
    pub results_count: usize,
    pub csv_url: Option<String>,
    pub error: Option<String>,
}

impl From<Job> for ScrapeStatus {
    fn from(job: Job) -> Self {
        Self {
            task_id: job.id,
            status: job.status,
            progress: job.progress,
            results_count: job.results_count,
            csv_url: job.csv_url,
            error: job.error,
        }
    }
}
