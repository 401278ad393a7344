//! Artifact download: the zipped XBRL package for one document.

use std::fs::{self, File};
use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::config::{HarvestConfig, FETCH_REQUEST_TYPE};
use crate::error::Result;
use crate::http::get_with_retry;

/// Downloads XBRL packages into the configured work directory.
pub struct ArtifactFetcher<'a> {
    client: &'a Client,
    config: &'a HarvestConfig,
}

impl<'a> ArtifactFetcher<'a> {
    pub fn new(client: &'a Client, config: &'a HarvestConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the XBRL package for one document id.
    ///
    /// The body is streamed to `work_dir/{doc_id}.zip`; the path is
    /// deterministic so a repeated fetch for the same id overwrites the
    /// previous file rather than accumulating copies.
    pub fn fetch(&self, doc_id: &str) -> Result<PathBuf> {
        let url = self.config.document_url(doc_id);
        let mut response = get_with_retry(
            self.client,
            self.config,
            &url,
            &[("type", FETCH_REQUEST_TYPE)],
        )?;

        fs::create_dir_all(&self.config.work_dir)?;
        let path = self.config.work_dir.join(format!("{doc_id}.zip"));

        let mut file = File::create(&path)?;
        let bytes = response.copy_to(&mut file)?;

        tracing::debug!(doc_id, bytes, path = %path.display(), "artifact downloaded");
        Ok(path)
    }
}
