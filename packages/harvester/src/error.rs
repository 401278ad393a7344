//! Error types for the harvester.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Invalid date format.
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD (e.g., 2024-04-01)")]
    InvalidDate(String),

    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// All retry attempts returned a non-success status.
    #[error("Retries exhausted after {attempts} attempts for {url} (last status {status})")]
    RetriesExhausted {
        attempts: u32,
        status: u16,
        url: String,
    },

    /// A listing entry was missing a required field.
    #[error("Malformed listing entry for date {date}: {reason}")]
    MalformedListing { date: String, reason: String },

    /// The downloaded artifact contains no XBRL instance document.
    #[error("No XBRL payload found in artifact for document {doc_id}")]
    MissingPayload { doc_id: String },

    /// The field-mapping layout violates an invariant.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Zip archive error.
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// CSV writing failed.
    #[error("CSV writing failed: {0}")]
    Csv(#[from] csv::Error),

    /// YAML layout parsing failed.
    #[error("Layout parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_display() {
        let err = HarvesterError::RetriesExhausted {
            attempts: 5,
            status: 403,
            url: "https://example.com/documents.json".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("5 attempts"));
        assert!(message.contains("403"));
    }

    #[test]
    fn test_missing_payload_display() {
        let err = HarvesterError::MissingPayload {
            doc_id: "S100ABCD".to_string(),
        };
        assert!(err.to_string().contains("S100ABCD"));
    }
}
