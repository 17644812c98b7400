use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub lead_source: LeadSourceConfig,
    pub enrichment: EnrichmentConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeadSourceConfig {
    pub actor: String,
    pub api_base: String,
    pub language: String,
    pub run_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    pub homepage_timeout_seconds: u64,
    pub contact_page_timeout_seconds: u64,
    pub contact_page: String,
    pub user_agent: String,
    pub max_concurrent_probes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lead_source: LeadSourceConfig {
                actor: "apify/google-maps-scraper".to_string(),
                api_base: "https://api.apify.com".to_string(),
                language: "pl".to_string(),
                run_timeout_seconds: 300,
            },
            enrichment: EnrichmentConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "results".to_string(),
            },
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            homepage_timeout_seconds: 10,
            contact_page_timeout_seconds: 5,
            contact_page: "kontakt".to_string(),
            user_agent: "LeadFlowBot/1.0".to_string(),
            max_concurrent_probes: 16,
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
