pub mod contact_extractor;
pub mod enricher;
pub mod types;

pub use contact_extractor::ContactExtractor;
pub use enricher::LeadEnricher;
pub use types::{ExtractedContacts, ProbeOutcome, ProbeReport};
