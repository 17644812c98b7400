use models::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod enrichment;
mod export;
mod jobs;
mod lead_source;
mod models;
mod server;

use config::{load_config, Config};
use enrichment::LeadEnricher;
use jobs::{InMemoryJobStore, JobRunner, JobStore};
use lead_source::ApifyLeadSource;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    std::env::set_var(
        "RUST_LOG",
        format!("leadflow={},rocket=warn,hyper=warn", config.logging.level),
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("leadflow=info".parse().unwrap()),
        )
        .init();

    // Create results directory
    tokio::fs::create_dir_all(&config.output.directory).await?;

    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let source = Arc::new(ApifyLeadSource::new(config.lead_source.clone()));
    let runner = Arc::new(JobRunner::new(
        store.clone(),
        source,
        LeadEnricher::new(config.enrichment.clone()),
        &config.output.directory,
    ));

    if std::env::var("APIFY_API_TOKEN").is_err() {
        warn!("APIFY_API_TOKEN is not set; scrape jobs will fail until it is provided");
    }

    info!("Starting LeadFlow API server");
    let _ = server::build_rocket(config, store, runner).launch().await?;

    Ok(())
}
