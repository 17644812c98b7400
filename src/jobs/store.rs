use crate::jobs::types::Job;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Registry of jobs by id. The orchestration task owning a job is the only
/// writer for that entry; status queries read concurrently.
///
/// Behind a trait so the process-lifetime in-memory table can be swapped for
/// a persistent store without touching the orchestration logic.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create(&self, query: &str, max_results: usize) -> Job;
    async fn get(&self, id: Uuid) -> Option<Job>;
    async fn update(&self, job: Job);
}

#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, query: &str, max_results: usize) -> Job {
        let job = Job::new(query, max_results);
        self.jobs.write().await.insert(job.id, job.clone());
        job
    }

    async fn get(&self, id: Uuid) -> Option<Job> {
        self.jobs.read().await.get(&id).cloned()
    }

    async fn update(&self, job: Job) {
        let mut jobs = self.jobs.write().await;
        match jobs.get(&job.id) {
            // Terminal records are immutable.
            Some(existing) if existing.status.is_terminal() => {}
            _ => {
                jobs.insert(job.id, job);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::types::JobStatus;

    #[tokio::test]
    async fn create_then_get_returns_the_pending_record() {
        let store = InMemoryJobStore::new();
        let job = store.create("cafes warsaw", 20).await;

        let fetched = store.get(job.id).await.expect("job should exist");
        assert_eq!(fetched.id, job.id);
        assert_eq!(fetched.status, JobStatus::Pending);
        assert_eq!(fetched.query, "cafes warsaw");
        assert_eq!(fetched.max_results, 20);
    }

    #[tokio::test]
    async fn unknown_id_is_none_not_a_crash() {
        let store = InMemoryJobStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn update_replaces_the_stored_snapshot() {
        let store = InMemoryJobStore::new();
        let mut job = store.create("q", 5).await;

        job.start();
        job.record_leads(3);
        store.update(job.clone()).await;

        let fetched = store.get(job.id).await.unwrap();
        assert_eq!(fetched.status, JobStatus::Running);
        assert_eq!(fetched.results_count, 3);
        assert_eq!(fetched.progress, 50);
    }

    #[tokio::test]
    async fn terminal_records_reject_further_updates() {
        let store = InMemoryJobStore::new();
        let mut job = store.create("q", 5).await;

        job.fail("boom".to_string());
        store.update(job.clone()).await;

        let mut stale = store.get(job.id).await.unwrap();
        stale.status = JobStatus::Running;
        stale.error = None;
        store.update(stale).await;

        let fetched = store.get(job.id).await.unwrap();
        assert_eq!(fetched.status, JobStatus::Failed);
        assert_eq!(fetched.error.as_deref(), Some("boom"));
    }
}
