//! Field extraction from a downloaded XBRL package.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use roxmltree::Document;
use zip::ZipArchive;

use crate::config::HarvestConfig;
use crate::error::{HarvesterError, Result};
use crate::layout::Layout;
use crate::types::{DocumentDescriptor, ExtractedRecord};
use crate::xbrl;

/// Relative location of XBRL instance documents inside the package.
const PAYLOAD_SUBDIR: &str = "XBRL/PublicDoc";

/// Removes the artifact file and its unpacked directory when the extraction
/// scope ends, whichever way it ends.
struct ArtifactScope {
    artifact: PathBuf,
    unpack_dir: PathBuf,
}

impl Drop for ArtifactScope {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.unpack_dir) {
            tracing::debug!(path = %self.unpack_dir.display(), error = %e, "unpack dir cleanup failed");
        }
        if let Err(e) = fs::remove_file(&self.artifact) {
            tracing::debug!(path = %self.artifact.display(), error = %e, "artifact cleanup failed");
        }
    }
}

/// Resolves the layout's targets against one document's XBRL payload.
pub struct FieldExtractor<'a> {
    layout: &'a Layout,
    config: &'a HarvestConfig,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(layout: &'a Layout, config: &'a HarvestConfig) -> Self {
        Self { layout, config }
    }

    /// Extract the configured fields for one document.
    ///
    /// Unpacks the artifact into `work_dir/{doc_id}/`, parses the first
    /// XBRL instance under `XBRL/PublicDoc/`, and builds a record covering
    /// every header column. Both the artifact and the unpacked directory
    /// are removed before this returns, on success and on every error path.
    pub fn extract(
        &self,
        artifact: &Path,
        doc: &DocumentDescriptor,
    ) -> Result<ExtractedRecord> {
        let unpack_dir = self.config.work_dir.join(&doc.doc_id);
        let _scope = ArtifactScope {
            artifact: artifact.to_path_buf(),
            unpack_dir: unpack_dir.clone(),
        };

        let mut archive = ZipArchive::new(File::open(artifact)?)?;
        archive.extract(&unpack_dir)?;

        let payload = find_payload(&unpack_dir, &doc.doc_id)?;
        tracing::debug!(doc_id = doc.doc_id, payload = %payload.display(), "parsing payload");

        let xml = fs::read_to_string(&payload)?;
        let parsed = Document::parse(&xml)?;

        Ok(self.build_record(&parsed, doc))
    }

    /// Resolve every configured column against the parsed payload.
    ///
    /// The securities-code column always comes from the listing entry.
    /// Each target is looked up in order; a missing fact leaves its column
    /// as an empty string, never absent, so every record carries exactly
    /// the header's columns.
    fn build_record(&self, parsed: &Document<'_>, doc: &DocumentDescriptor) -> ExtractedRecord {
        let mut record = ExtractedRecord::new();
        record.set(&self.layout.extra_targets.sec_code, &doc.sec_code);

        for target in &self.layout.targets {
            if let Some(value) = xbrl::find_value(parsed, &target.key, &target.context_id) {
                record.set(&target.name, value);
            }
            if !record.contains(&target.name) {
                record.set(&target.name, "");
            }
        }

        for column in &self.layout.header {
            if !record.contains(column) {
                record.set(column, "");
            }
        }

        record
    }
}

/// Locate the XBRL instance document inside an unpacked artifact.
///
/// Zero matches is a malformed artifact and fails the document; with more
/// than one match the lexicographically first is taken, for determinism.
fn find_payload(unpack_dir: &Path, doc_id: &str) -> Result<PathBuf> {
    let payload_dir = unpack_dir.join(PAYLOAD_SUBDIR);
    let mut candidates = Vec::new();

    if payload_dir.is_dir() {
        for entry in fs::read_dir(&payload_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "xbrl") {
                candidates.push(path);
            }
        }
    }

    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| HarvesterError::MissingPayload {
            doc_id: doc_id.to_string(),
        })
}
