// src/enrichment/enricher.rs
use crate::config::EnrichmentConfig;
use crate::enrichment::contact_extractor::ContactExtractor;
use crate::enrichment::types::{ProbeOutcome, ProbeReport};
use crate::models::Lead;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use url::Url;

/// Probes lead websites for contact details and applies the findings to a
/// batch of leads. Probes are isolated: one slow or broken site can never
/// fail the batch.
#[derive(Debug, Clone)]
pub struct LeadEnricher {
    config: EnrichmentConfig,
    extractor: ContactExtractor,
}

impl LeadEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self {
            config,
            extractor: ContactExtractor::new(),
        }
    }

    /// Enrich every lead in the batch concurrently, bounded by
    /// `max_concurrent_probes`. The output preserves input order and length
    /// regardless of probe completion order.
    pub async fn enrich(&self, mut leads: Vec<Lead>) -> Vec<Lead> {
        if leads.is_empty() {
            return leads;
        }

        // One client per batch so connections are reused across probes and
        // released when the batch is done.
        let client = match Client::builder()
            .user_agent(&self.config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to build HTTP client, skipping enrichment: {}", e);
                return leads;
            }
        };

        info!("🚀 Probing {} lead websites for contacts", leads.len());

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_probes));
        let mut handles = Vec::with_capacity(leads.len());

        for lead in &leads {
            let website = lead.website.clone().unwrap_or_default();
            let enricher = self.clone();
            let client = client.clone();
            let semaphore = Arc::clone(&semaphore);

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                enricher.probe_site(&client, &website).await
            }));
        }

        for (lead, handle) in leads.iter_mut().zip(handles) {
            let report = match handle.await {
                Ok(report) => report,
                Err(e) => {
                    warn!("Probe task for {} aborted: {}", lead.name, e);
                    ProbeReport::empty(ProbeOutcome::FetchFailed(e.to_string()))
                }
            };
            debug!("Probe outcome for {}: {:?}", lead.name, report.outcome);
            lead.email = lead.email.take().or(report.email);
            lead.phone = lead.phone.take().or(report.phone);
        }

        let with_contacts = leads
            .iter()
            .filter(|l| l.email.is_some() || l.phone.is_some())
            .count();
        info!(
            "🎯 Enrichment complete: contact details for {}/{} leads",
            with_contacts,
            leads.len()
        );

        leads
    }

    /// Fetch a lead's homepage and mine it for contacts; when no email turns
    /// up, try the contact page as well and re-scan the combined text.
    ///
    /// Never fails the caller. Unusable URLs short-circuit without touching
    /// the network, fetch errors degrade to an empty report.
    pub async fn probe_site(&self, client: &Client, url: &str) -> ProbeReport {
        let base = match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
            _ => {
                debug!("Skipping probe, no usable website: {:?}", url);
                return ProbeReport::empty(ProbeOutcome::InvalidUrl);
            }
        };

        let mut text = match self
            .fetch(client, base.as_str(), self.config.homepage_timeout_seconds)
            .await
        {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to fetch {}: {}", base, e);
                let outcome = if e.is_timeout() {
                    ProbeOutcome::TimedOut
                } else {
                    ProbeOutcome::FetchFailed(e.to_string())
                };
                return ProbeReport::empty(outcome);
            }
        };

        let mut contacts = self.extractor.extract(&text);

        if contacts.email.is_none() {
            let contact_url = format!(
                "{}/{}",
                base.as_str().trim_end_matches('/'),
                self.config.contact_page.trim_matches('/')
            );
            // Best effort only: a missing contact page is not worth logging.
            if let Ok(extra) = self
                .fetch(client, &contact_url, self.config.contact_page_timeout_seconds)
                .await
            {
                text.push_str(&extra);
                contacts = self.extractor.extract(&text);
            }
        }

        ProbeReport::from_contacts(contacts)
    }

    async fn fetch(
        &self,
        client: &Client,
        url: &str,
        timeout_seconds: u64,
    ) -> reqwest::Result<String> {
        let response = client
            .get(url)
            .timeout(Duration::from_secs(timeout_seconds))
            .send()
            .await?;
        response.text().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> EnrichmentConfig {
        EnrichmentConfig {
            homepage_timeout_seconds: 1,
            contact_page_timeout_seconds: 1,
            ..EnrichmentConfig::default()
        }
    }

    fn enricher() -> LeadEnricher {
        LeadEnricher::new(test_config())
    }

    #[tokio::test]
    async fn unusable_websites_short_circuit_without_network_access() {
        let server = MockServer::start().await;
        let client = Client::new();
        let enricher = enricher();

        for url in ["", "not-a-url", "www.example.com", "ftp://example.com/x"] {
            let report = enricher.probe_site(&client, url).await;
            assert_eq!(report.outcome, ProbeOutcome::InvalidUrl);
            assert!(report.email.is_none());
            assert!(report.phone.is_none());
        }

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn homepage_email_skips_the_contact_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("Reach us: a@x.com or b@x.com"),
            )
            .mount(&server)
            .await;

        let report = enricher().probe_site(&Client::new(), &server.uri()).await;

        assert_eq!(report.outcome, ProbeOutcome::ContactsFound);
        let email = report.email.expect("email expected");
        assert!(email == "a@x.com" || email == "b@x.com");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "secondary fetch should not happen");
    }

    #[tokio::test]
    async fn falls_back_to_contact_page_when_homepage_has_no_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Zadzwoń: 501 502 503"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/kontakt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Mail: biuro@firma.pl"))
            .mount(&server)
            .await;

        let report = enricher().probe_site(&Client::new(), &server.uri()).await;

        assert_eq!(report.email.as_deref(), Some("biuro@firma.pl"));
        // Phone from the homepage survives the combined re-scan.
        assert_eq!(report.phone.as_deref(), Some("501 502 503"));
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_contact_page_keeps_homepage_findings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tel. 601 602 603"))
            .mount(&server)
            .await;
        // /kontakt is unmatched and returns 404 with an empty body.

        let report = enricher().probe_site(&Client::new(), &server.uri()).await;

        assert_eq!(report.phone.as_deref(), Some("601 602 603"));
        assert!(report.email.is_none());
        assert_eq!(report.outcome, ProbeOutcome::ContactsFound);
    }

    #[tokio::test]
    async fn connection_failure_degrades_to_empty_report() {
        // Port 1 is never listening.
        let report = enricher()
            .probe_site(&Client::new(), "http://127.0.0.1:1/")
            .await;

        assert!(report.email.is_none());
        assert!(report.phone.is_none());
        assert!(
            matches!(report.outcome, ProbeOutcome::FetchFailed(_)),
            "unexpected outcome {:?}",
            report.outcome
        );
    }

    #[tokio::test]
    async fn slow_homepage_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("kontakt@firma.pl")
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let report = enricher().probe_site(&Client::new(), &server.uri()).await;

        assert_eq!(report.outcome, ProbeOutcome::TimedOut);
        assert!(report.email.is_none());
    }

    #[tokio::test]
    async fn enrich_preserves_lead_order_under_mixed_latency() {
        let server = MockServer::start().await;
        // Slowest site first so completion order is the reverse of input order.
        for i in 0..4u64 {
            Mock::given(method("GET"))
                .and(path(format!("/site{i}/")))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string(format!("kontakt: lead{i}@example.com"))
                        .set_delay(Duration::from_millis((3 - i) * 150)),
                )
                .mount(&server)
                .await;
        }

        let leads: Vec<Lead> = (0..4)
            .map(|i| {
                let mut lead = Lead::new(format!("Lead {i}"));
                lead.website = Some(format!("{}/site{i}/", server.uri()));
                lead
            })
            .collect();

        let enriched = enricher().enrich(leads).await;

        assert_eq!(enriched.len(), 4);
        for (i, lead) in enriched.iter().enumerate() {
            assert_eq!(lead.name, format!("Lead {i}"));
            assert_eq!(lead.email.as_deref(), Some(format!("lead{i}@example.com").as_str()));
        }
    }

    #[tokio::test]
    async fn enrich_leaves_leads_without_website_untouched() {
        let leads = vec![Lead::new("Kwiaciarnia"), Lead::new("Piekarnia")];

        let enriched = enricher().enrich(leads).await;

        assert_eq!(enriched.len(), 2);
        for lead in &enriched {
            assert!(lead.email.is_none());
            assert!(lead.phone.is_none());
        }
    }

    #[tokio::test]
    async fn enrich_never_overwrites_an_existing_contact() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("other@firma.pl"))
            .mount(&server)
            .await;

        let mut lead = Lead::new("Firma");
        lead.website = Some(server.uri());
        lead.email = Some("known@firma.pl".to_string());

        let enriched = enricher().enrich(vec![lead]).await;

        assert_eq!(enriched[0].email.as_deref(), Some("known@firma.pl"));
    }
}
