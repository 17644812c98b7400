// src/enrichment/contact_extractor.rs
use crate::enrichment::types::ExtractedContacts;
use regex::Regex;

/// Pure text miner for email addresses and Polish phone numbers.
#[derive(Debug, Clone)]
pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            email_regex: Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+")
                .expect("invalid email regex"),
            // Optional +48/0048 country prefix, then three groups of three digits.
            phone_regex: Regex::new(r"(?:\+48|0048)?[\s-]?\d{3}[\s-]?\d{3}[\s-]?\d{3}")
                .expect("invalid phone regex"),
        }
    }

    /// Returns the first email and phone found in `text`, or none.
    ///
    /// When a page repeats the same address the duplicates collapse to one
    /// value; when it lists several distinct ones the first occurrence wins,
    /// so identical input always yields identical output.
    pub fn extract(&self, text: &str) -> ExtractedContacts {
        ExtractedContacts {
            email: self
                .email_regex
                .find(text)
                .map(|m| m.as_str().to_string()),
            // The separator class may absorb whitespace ahead of the first
            // digit group, so trim the raw match.
            phone: self
                .phone_regex
                .find(text)
                .map(|m| m.as_str().trim().to_string()),
        }
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}
