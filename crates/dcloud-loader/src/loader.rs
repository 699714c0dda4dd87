use anyhow::Result;
use tracing::{debug, warn};

use dcloud_core::error::Error;
use dcloud_core::traits::{DocumentReader, QueryClient};
use dcloud_core::types::{ChunkLoaderConfig, DocumentRecord, LoadOptions, QueryRequest, ResultRow};

use crate::query::ChunkQuery;

/// Loads chunk documents from one data source through an injected [`QueryClient`].
///
/// The query is validated and rendered once in [`ChunkLoader::new`]; each
/// [`ChunkLoader::load`] is a single request/response round trip.
pub struct ChunkLoader<C> {
    config: ChunkLoaderConfig,
    request: QueryRequest,
    client: C,
}

impl<C: QueryClient> ChunkLoader<C> {
    /// Validate the configuration and prepare the query. Does not touch the client.
    pub fn new(config: ChunkLoaderConfig, client: C) -> dcloud_core::error::Result<Self> {
        if config.store_location.trim().is_empty() {
            return Err(Error::InvalidConfig("store_location must not be empty".to_string()));
        }
        let request = ChunkQuery::from_config(&config)?.request();
        if let Some(clause) = &config.filter_clause {
            warn!(store = %config.store_location, clause = %clause, "filter_clause is set but not applied to the chunk query");
        }
        Ok(Self { config, request, client })
    }

    pub fn config(&self) -> &ChunkLoaderConfig { &self.config }

    pub fn sql(&self) -> &str { &self.request.sql }

    pub fn filter_clause(&self) -> Option<&str> { self.config.filter_clause.as_deref() }

    pub fn load(&self) -> Result<Vec<DocumentRecord>> {
        self.load_with(&LoadOptions::default())
    }

    /// Same as [`ChunkLoader::load`]; `options` is accepted for forward compatibility and ignored.
    pub fn load_with(&self, _options: &LoadOptions) -> Result<Vec<DocumentRecord>> {
        debug!(store = %self.config.store_location, request = ?self.request, "Submitting chunk query");
        let rows = self.client.read_data(&self.request)?;
        let received = rows.len();
        let documents = rows_to_documents(rows)?;
        debug!(store = %self.config.store_location, received, emitted = documents.len(), "Chunk query mapped");
        Ok(documents)
    }
}

impl<C: QueryClient> DocumentReader for ChunkLoader<C> {
    fn load(&self) -> Result<Vec<DocumentRecord>> { Self::load(self) }
}

/// Map rows in order, dropping those whose payload is absent.
///
/// A row without an id, or with a missing or non-finite score, fails the whole batch.
pub fn rows_to_documents(
    rows: Vec<ResultRow>,
) -> dcloud_core::error::Result<Vec<DocumentRecord>> {
    let mut documents = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if let Some(doc) = row_to_document(index, row)? {
            documents.push(doc);
        }
    }
    Ok(documents)
}

fn row_to_document(
    index: usize,
    row: ResultRow,
) -> dcloud_core::error::Result<Option<DocumentRecord>> {
    let text = row.payload_text().map(str::to_string);
    let ResultRow { id, score, .. } = row;
    let id = id.ok_or(Error::MissingField { index, field: "id" })?;
    let score = score.ok_or(Error::MissingField { index, field: "score" })?;
    if !score.is_finite() {
        return Err(Error::NonFiniteScore { index, score });
    }
    Ok(text.map(|text| DocumentRecord::new(text, id, score)))
}
