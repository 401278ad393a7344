//! EDINET Harvester - Download annual securities reports from the EDINET
//! disclosure repository and extract XBRL facts to CSV.
//!
//! The pipeline enumerates the dates of a harvest term, queries the EDINET
//! document listing once per date, filters the results down to annual
//! securities reports, then for each filing downloads the zipped XBRL
//! package, extracts a configured set of facts and appends them to a CSV
//! file in fixed-size batches.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use edinet_harvester::term::Term;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let term = Term::fiscal_year_to_date(today);
//! assert_eq!(term.start, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: constants and the run-wide `HarvestConfig`
//! - [`error`]: error types and Result alias
//! - [`term`]: harvest date range and fiscal-year default
//! - [`http`]: HTTP client with fixed-interval retry
//! - [`index`]: document discovery against the listing endpoint
//! - [`fetch`]: XBRL package download
//! - [`layout`]: field-mapping configuration
//! - [`xbrl`]: fact lookup over parsed XBRL instances
//! - [`extract`]: per-document field extraction with scoped cleanup
//! - [`writer`]: batched CSV output
//! - [`harvester`]: pipeline orchestration
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod harvester;
pub mod http;
pub mod index;
pub mod layout;
pub mod term;
pub mod types;
pub mod writer;
pub mod xbrl;

// Re-export main entry points
pub use harvester::{discover, harvest, RunOutcome};

// Re-export commonly used items
pub use config::HarvestConfig;
pub use error::{HarvesterError, Result};
pub use layout::Layout;
pub use term::Term;
pub use types::{DocumentDescriptor, ExtractedRecord};
