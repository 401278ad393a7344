//! Configuration constants and the run-wide `HarvestConfig` value.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{HarvesterError, Result};

/// EDINET document listing endpoint.
pub const DOCUMENT_LIST_URL: &str =
    "https://disclosure.edinet-fsa.go.jp/api/v1/documents.json";

/// Base URL for the EDINET document retrieval endpoint; the document id is
/// appended as the final path segment.
pub const DOCUMENT_FETCH_BASE_URL: &str =
    "https://disclosure.edinet-fsa.go.jp/api/v1/documents";

/// Listing request type selecting disclosure document metadata.
pub const LIST_REQUEST_TYPE: &str = "2";

/// Document request type selecting the XBRL zip package.
pub const FETCH_REQUEST_TYPE: &str = "1";

/// Ordinance code for the Cabinet Office ordinance on disclosure of
/// corporate affairs (企業内容等の開示に関する内閣府令).
pub const ORDINANCE_CODE: &str = "010";

/// Form code for the annual securities report (第三号様式 有価証券報告書).
pub const FORM_CODE: &str = "030000";

/// Number of extracted records accumulated before a CSV flush.
pub const BATCH_SIZE: usize = 50;

/// Maximum attempts per HTTP request.
pub const MAX_RETRIES: u32 = 5;

/// Sleep between attempts after a non-2xx response.
pub const RETRY_DELAY_SECS: u64 = 10;

/// Discovery pacing: sleep after every date whose zero-based index is a
/// multiple of this.
pub const PACE_EVERY: usize = 10;

/// Discovery pacing sleep.
pub const PACE_DELAY_SECS: u64 = 2;

/// Sleep after each full batch flush.
pub const FLUSH_PAUSE_SECS: u64 = 5;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Immutable run-wide configuration.
///
/// Every component takes this by reference instead of reading scattered
/// constants, so tests can substitute endpoints, sleeps and directories.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Listing endpoint URL.
    pub list_url: String,

    /// Document retrieval base URL (document id appended).
    pub fetch_base_url: String,

    /// Ordinance code filings must carry.
    pub ordinance_code: String,

    /// Form code filings must carry.
    pub form_code: String,

    /// Records per CSV flush.
    pub batch_size: usize,

    /// Attempts per HTTP request.
    pub max_retries: u32,

    /// Sleep between retry attempts.
    pub retry_delay: Duration,

    /// Discovery pacing stride (zero-based date index).
    pub pace_every: usize,

    /// Discovery pacing sleep.
    pub pace_delay: Duration,

    /// Sleep after each full batch flush.
    pub flush_pause: Duration,

    /// Directory holding downloaded artifacts and their unpacked contents.
    pub work_dir: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            list_url: DOCUMENT_LIST_URL.to_string(),
            fetch_base_url: DOCUMENT_FETCH_BASE_URL.to_string(),
            ordinance_code: ORDINANCE_CODE.to_string(),
            form_code: FORM_CODE.to_string(),
            batch_size: BATCH_SIZE,
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_secs(RETRY_DELAY_SECS),
            pace_every: PACE_EVERY,
            pace_delay: Duration::from_secs(PACE_DELAY_SECS),
            flush_pause: Duration::from_secs(FLUSH_PAUSE_SECS),
            work_dir: std::env::temp_dir(),
        }
    }
}

impl HarvestConfig {
    /// Build the document retrieval URL for one document id.
    #[must_use]
    pub fn document_url(&self, doc_id: &str) -> String {
        format!("{}/{}", self.fetch_base_url, doc_id)
    }
}

/// Parse a YYYY-MM-DD date string.
///
/// # Examples
/// ```
/// use edinet_harvester::config::parse_date;
///
/// assert!(parse_date("2024-04-01").is_ok());
/// assert!(parse_date("2024/04/01").is_err());
/// assert!(parse_date("2024-02-30").is_err());
/// ```
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(HarvesterError::InvalidDate(date_str.to_string()));
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| HarvesterError::InvalidDate(date_str.to_string()))
}
