//! Main harvest pipeline that ties all components together.

use std::path::Path;

use crate::config::HarvestConfig;
use crate::error::Result;
use crate::extract::FieldExtractor;
use crate::fetch::ArtifactFetcher;
use crate::http::create_client;
use crate::index::DocumentIndexClient;
use crate::layout::Layout;
use crate::term::Term;
use crate::types::DocumentDescriptor;
use crate::writer::BatchWriter;

/// What a harvest run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The destination file already existed; nothing was fetched.
    AlreadyComplete,

    /// A full run: this many documents were fetched, extracted and written.
    Harvested { documents: usize },
}

/// Discovery only: list the matching documents for the term.
pub fn discover(config: &HarvestConfig, term: &Term) -> Result<Vec<DocumentDescriptor>> {
    let dates = term.day_list();
    tracing::info!(start = %term.start, end = %term.end, dates = dates.len(), "discovering documents");

    let client = create_client()?;
    DocumentIndexClient::new(&client, config).discover(&dates)
}

/// Full harvest: discover, then fetch/extract/write every document.
///
/// The destination file doubles as the completed-run marker: if it already
/// exists the run returns [`RunOutcome::AlreadyComplete`] before any
/// network call is made. Documents are processed last-in-first-out from
/// the discovered list; one document's fetch, extract and cleanup finish
/// before the next begins, so at most one artifact is on disk at a time.
/// Any per-document failure aborts the whole run.
pub fn harvest(
    config: &HarvestConfig,
    term: &Term,
    layout: &Layout,
    output: &Path,
) -> Result<RunOutcome> {
    if output.exists() {
        tracing::info!(output = %output.display(), "destination already exists, nothing to do");
        return Ok(RunOutcome::AlreadyComplete);
    }

    let mut documents = discover(config, term)?;
    tracing::info!(documents = documents.len(), output = %output.display(), "downloading and writing CSV");

    let client = create_client()?;
    let fetcher = ArtifactFetcher::new(&client, config);
    let extractor = FieldExtractor::new(layout, config);
    let mut writer = BatchWriter::create(
        output,
        &layout.header,
        config.batch_size,
        config.flush_pause,
    )?;

    while let Some(doc) = documents.pop() {
        let artifact = fetcher.fetch(&doc.doc_id)?;
        let record = extractor.extract(&artifact, &doc)?;
        writer.push(record)?;
    }

    let written = writer.finish()?;
    tracing::info!(documents = written, "CSV output complete");

    Ok(RunOutcome::Harvested { documents: written })
}
