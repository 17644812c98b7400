// src/jobs/types.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Enriching,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Enriching => "enriching",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One orchestration run, from submission to a terminal state.
///
/// The record moves forward only: pending → running → enriching → completed,
/// with failed reachable from any non-terminal state. Transition methods
/// ignore anything the state machine does not allow, so a terminal record
/// can never change again.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub progress: u8,
    pub query: String,
    pub max_results: usize,
    pub results_count: usize,
    pub csv_url: Option<String>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: JobStatus::Pending,
            progress: 0,
            query: query.into(),
            max_results,
            results_count: 0,
            csv_url: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    pub fn start(&mut self) {
        if self.status == JobStatus::Pending {
            self.status = JobStatus::Running;
            self.error = None;
        }
    }

    pub fn record_leads(&mut self, count: usize) {
        if self.status == JobStatus::Running {
            self.results_count = count;
            self.bump_progress(50);
        }
    }

    pub fn begin_enrichment(&mut self) {
        if self.status == JobStatus::Running {
            self.status = JobStatus::Enriching;
        }
    }

    pub fn finish_enrichment(&mut self) {
        if self.status == JobStatus::Enriching {
            self.bump_progress(90);
        }
    }

    pub fn complete(&mut self, csv_url: String) {
        if self.status == JobStatus::Enriching {
            self.status = JobStatus::Completed;
            self.csv_url = Some(csv_url);
            self.bump_progress(100);
        }
    }

    /// Terminal failure; keeps progress at its last recorded value.
    pub fn fail(&mut self, message: String) {
        if !self.status.is_terminal() {
            self.status = JobStatus::Failed;
            self.error = Some(message);
        }
    }

    fn bump_progress(&mut self, progress: u8) {
        self.progress = self.progress.max(progress);
    }
}
