//! Document discovery against the EDINET listing endpoint.

use std::thread;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::{HarvestConfig, LIST_REQUEST_TYPE};
use crate::error::{HarvesterError, Result};
use crate::http::get_with_retry;
use crate::types::DocumentDescriptor;

/// Shape of the listing endpoint response.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    results: Vec<Map<String, Value>>,
}

/// Queries the listing endpoint one date at a time and filters the results
/// down to annual securities reports.
pub struct DocumentIndexClient<'a> {
    client: &'a Client,
    config: &'a HarvestConfig,
}

impl<'a> DocumentIndexClient<'a> {
    pub fn new(client: &'a Client, config: &'a HarvestConfig) -> Self {
        Self { client, config }
    }

    /// Discover documents across the given dates, in input order.
    ///
    /// One listing request per date; entries are kept only when both the
    /// ordinance code and the form code match the configured constants.
    /// After every date at index 0, 10, 20, ... the client sleeps briefly
    /// to stay under the provider's implicit rate limit.
    pub fn discover(&self, dates: &[NaiveDate]) -> Result<Vec<DocumentDescriptor>> {
        let mut documents = Vec::new();

        tracing::info!(dates = dates.len(), "searching document listings");

        for (index, date) in dates.iter().enumerate() {
            let found = self.discover_date(*date)?;
            tracing::debug!(
                date = %date,
                index,
                total = dates.len(),
                matched = found.len(),
                "listing processed"
            );
            documents.extend(found);

            if index % self.config.pace_every == 0 {
                thread::sleep(self.config.pace_delay);
            }
        }

        tracing::info!(documents = documents.len(), "discovery complete");
        Ok(documents)
    }

    /// Run one listing request and filter its results.
    fn discover_date(&self, date: NaiveDate) -> Result<Vec<DocumentDescriptor>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let response = get_with_retry(
            self.client,
            self.config,
            &self.config.list_url,
            &[("date", date_str.as_str()), ("type", LIST_REQUEST_TYPE)],
        )?;

        let listing: ListingResponse = response.json()?;

        let mut documents = Vec::new();
        for entry in listing.results {
            if !self.matches_filter(&entry) {
                continue;
            }
            let descriptor = DocumentDescriptor::from_listing(entry).ok_or_else(|| {
                HarvesterError::MalformedListing {
                    date: date_str.clone(),
                    reason: "entry has no docID".to_string(),
                }
            })?;
            documents.push(descriptor);
        }

        Ok(documents)
    }

    /// Whether a listing entry is an annual securities report.
    fn matches_filter(&self, entry: &Map<String, Value>) -> bool {
        let field = |key: &str| entry.get(key).and_then(Value::as_str).unwrap_or_default();
        field("ordinanceCode") == self.config.ordinance_code
            && field("formCode") == self.config.form_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ordinance: &str, form: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("ordinanceCode".into(), Value::String(ordinance.into()));
        map.insert("formCode".into(), Value::String(form.into()));
        map
    }

    #[test]
    fn test_filter_requires_both_codes() {
        let config = HarvestConfig::default();
        let client = crate::http::create_client().unwrap();
        let index = DocumentIndexClient::new(&client, &config);

        assert!(index.matches_filter(&entry("010", "030000")));
        assert!(!index.matches_filter(&entry("010", "043000")));
        assert!(!index.matches_filter(&entry("020", "030000")));
        assert!(!index.matches_filter(&Map::new()));
    }
}
