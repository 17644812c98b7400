// src/jobs/orchestrator.rs
use crate::enrichment::LeadEnricher;
use crate::export;
use crate::jobs::store::JobStore;
use crate::jobs::types::Job;
use crate::lead_source::LeadSource;
use crate::models;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Runs submitted jobs through the fetch → enrich → persist pipeline,
/// recording progress in the job store along the way. Every stage failure
/// ends in the job's terminal failed state; nothing propagates to the
/// submission caller.
pub struct JobRunner {
    store: Arc<dyn JobStore>,
    source: Arc<dyn LeadSource>,
    enricher: LeadEnricher,
    output_dir: PathBuf,
}

impl JobRunner {
    pub fn new(
        store: Arc<dyn JobStore>,
        source: Arc<dyn LeadSource>,
        enricher: LeadEnricher,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            source,
            enricher,
            output_dir: output_dir.into(),
        }
    }

    /// Register a job and spawn its run; returns the id immediately.
    pub async fn submit(self: &Arc<Self>, query: &str, max_results: usize) -> Uuid {
        let job = self.store.create(query, max_results).await;
        let id = job.id;
        info!("[{}] Accepted scrape job for '{}'", id, job.query);

        let runner = Arc::clone(self);
        tokio::spawn(async move { runner.run(id).await });

        id
    }

    pub async fn run(&self, id: Uuid) {
        let Some(mut job) = self.store.get(id).await else {
            warn!("[{}] Job vanished before it could run", id);
            return;
        };

        job.start();
        self.store.update(job.clone()).await;
        info!("[{}] 🚀 Running scrape for '{}'", id, job.query);

        if let Err(e) = self.execute(&mut job).await {
            error!("[{}] Job failed: {}", id, e);
            job.fail(e.to_string());
            self.store.update(job).await;
        }
    }

    async fn execute(&self, job: &mut Job) -> models::Result<()> {
        let leads = self
            .source
            .fetch_leads(&job.query, job.max_results)
            .await?;
        if leads.is_empty() {
            // Zero results is a normal, successful outcome.
            info!("[{}] Lead source returned no results", job.id);
        }
        job.record_leads(leads.len());
        self.store.update(job.clone()).await;

        job.begin_enrichment();
        self.store.update(job.clone()).await;
        info!("[{}] Enriching {} leads", job.id, job.results_count);
        let enriched = self.enricher.enrich(leads).await;
        job.finish_enrichment();
        self.store.update(job.clone()).await;

        let filename = format!("{}.csv", job.id);
        export::write_leads_csv(&enriched, &self.output_dir.join(&filename))?;
        job.complete(format!("/download/{}", filename));
        self.store.update(job.clone()).await;
        info!("[{}] 🏁 Completed with {} leads", job.id, enriched.len());

        Ok(())
    }
}
