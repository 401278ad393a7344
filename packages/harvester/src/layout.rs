//! Field-mapping layout: which XBRL facts go into which CSV columns.
//!
//! The layout file is YAML with three sections:
//!
//! ```yaml
//! HEADER:           # ordered output columns
//!   - sec_code
//!   - company_name
//! EXTRA_TARGET:
//!   SEC_CODE: sec_code   # column filled from the listing, not the XBRL
//! TARGET:           # ordered fact lookups
//!   - KEY: jpcrp_cor:CompanyNameCoverPage
//!     CONTEXT_ID: FilingDateInstant
//!     NAME: company_name
//! ```
//!
//! It is loaded once per run and passed by reference into the extractor.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{HarvesterError, Result};

/// One fact lookup: element key + context id, written to `name`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Target {
    /// Qualified XBRL element name (e.g., "jpcrp_cor:CompanyNameCoverPage").
    #[serde(rename = "KEY")]
    pub key: String,

    /// Context reference the fact must carry.
    #[serde(rename = "CONTEXT_ID")]
    pub context_id: String,

    /// Output column name.
    #[serde(rename = "NAME")]
    pub name: String,
}

/// Columns filled from the listing entry rather than the XBRL payload.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtraTargets {
    /// Column receiving the filer's securities code.
    #[serde(rename = "SEC_CODE")]
    pub sec_code: String,
}

/// The full field-mapping layout.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Layout {
    /// Ordered output columns.
    #[serde(rename = "HEADER")]
    pub header: Vec<String>,

    /// Listing-sourced columns.
    #[serde(rename = "EXTRA_TARGET")]
    pub extra_targets: ExtraTargets,

    /// Ordered fact lookups.
    #[serde(rename = "TARGET")]
    pub targets: Vec<Target>,
}

impl Layout {
    /// Load and validate a layout file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Parse and validate a layout from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let layout: Self = serde_yaml::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check the layout invariants: every referenced column appears in the
    /// header, and no column is written by more than one source.
    fn validate(&self) -> Result<()> {
        let header: HashSet<&str> = self.header.iter().map(String::as_str).collect();

        if !header.contains(self.extra_targets.sec_code.as_str()) {
            return Err(HarvesterError::InvalidLayout(format!(
                "EXTRA_TARGET.SEC_CODE column '{}' is not in HEADER",
                self.extra_targets.sec_code
            )));
        }

        let mut written: HashSet<&str> = HashSet::new();
        written.insert(self.extra_targets.sec_code.as_str());

        for target in &self.targets {
            if !header.contains(target.name.as_str()) {
                return Err(HarvesterError::InvalidLayout(format!(
                    "TARGET column '{}' is not in HEADER",
                    target.name
                )));
            }
            if !written.insert(target.name.as_str()) {
                return Err(HarvesterError::InvalidLayout(format!(
                    "column '{}' is written more than once",
                    target.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
HEADER:
  - sec_code
  - company_name
  - net_sales
EXTRA_TARGET:
  SEC_CODE: sec_code
TARGET:
  - KEY: jpcrp_cor:CompanyNameCoverPage
    CONTEXT_ID: FilingDateInstant
    NAME: company_name
  - KEY: jpcrp_cor:NetSalesSummaryOfBusinessResults
    CONTEXT_ID: CurrentYearDuration
    NAME: net_sales
"#;

    #[test]
    fn test_parse_sample() {
        let layout = Layout::from_yaml(SAMPLE).unwrap();
        assert_eq!(layout.header, vec!["sec_code", "company_name", "net_sales"]);
        assert_eq!(layout.extra_targets.sec_code, "sec_code");
        assert_eq!(layout.targets.len(), 2);
        assert_eq!(layout.targets[0].key, "jpcrp_cor:CompanyNameCoverPage");
        assert_eq!(layout.targets[0].context_id, "FilingDateInstant");
        assert_eq!(layout.targets[1].name, "net_sales");
    }

    #[test]
    fn test_target_column_must_be_in_header() {
        let yaml = r#"
HEADER: [sec_code]
EXTRA_TARGET:
  SEC_CODE: sec_code
TARGET:
  - KEY: jpcrp_cor:CompanyNameCoverPage
    CONTEXT_ID: FilingDateInstant
    NAME: company_name
"#;
        let err = Layout::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, HarvesterError::InvalidLayout(_)));
        assert!(err.to_string().contains("company_name"));
    }

    #[test]
    fn test_sec_code_column_must_be_in_header() {
        let yaml = r#"
HEADER: [company_name]
EXTRA_TARGET:
  SEC_CODE: sec_code
TARGET: []
"#;
        let err = Layout::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, HarvesterError::InvalidLayout(_)));
    }

    #[test]
    fn test_duplicate_target_column_rejected() {
        let yaml = r#"
HEADER: [sec_code, company_name]
EXTRA_TARGET:
  SEC_CODE: sec_code
TARGET:
  - KEY: a:One
    CONTEXT_ID: FilingDateInstant
    NAME: company_name
  - KEY: a:Two
    CONTEXT_ID: FilingDateInstant
    NAME: company_name
"#;
        let err = Layout::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_target_reusing_sec_code_column_rejected() {
        let yaml = r#"
HEADER: [sec_code]
EXTRA_TARGET:
  SEC_CODE: sec_code
TARGET:
  - KEY: a:One
    CONTEXT_ID: FilingDateInstant
    NAME: sec_code
"#;
        assert!(Layout::from_yaml(yaml).is_err());
    }
}
