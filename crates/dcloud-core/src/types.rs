//! Domain types shared by the chunk loader and its query clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type RecordId = String;
pub type Meta = BTreeMap<String, serde_json::Value>;

/// Value the store emits in place of a missing chunk payload.
pub const NULL_MARKER: &str = "null";

pub const META_ROW_ID: &str = "row_id";
pub const META_SCORE: &str = "score";

/// Where and what to load.
///
/// - `store_location`: connection reference for the target data store
/// - `chunk_table`: table holding chunk text keyed by record id
/// - `vector_table`: vector index searched for similar records
/// - `text_column`: column of the vector index to search against
/// - `filter_clause`: raw filter fragment, kept but not applied to the query
/// - `search`/`columns`: similarity parameters and result column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkLoaderConfig {
    pub store_location: String,
    pub chunk_table: String,
    pub vector_table: String,
    pub text_column: String,
    #[serde(default)]
    pub filter_clause: Option<String>,
    #[serde(default)]
    pub search: SearchParams,
    #[serde(default)]
    pub columns: ColumnNames,
}

impl ChunkLoaderConfig {
    pub fn new(
        store_location: impl Into<String>,
        chunk_table: impl Into<String>,
        vector_table: impl Into<String>,
        text_column: impl Into<String>,
    ) -> Self {
        Self {
            store_location: store_location.into(),
            chunk_table: chunk_table.into(),
            vector_table: vector_table.into(),
            text_column: text_column.into(),
            filter_clause: None,
            search: SearchParams::default(),
            columns: ColumnNames::default(),
        }
    }

    #[must_use]
    pub fn with_filter_clause(mut self, clause: impl Into<String>) -> Self {
        self.filter_clause = Some(clause.into());
        self
    }

    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>, top_k: u32) -> Self {
        self.search = SearchParams { query: query.into(), top_k };
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }
}

/// Similarity-search inputs. Defaults match a match-all search returning one hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub query: String,
    pub top_k: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { query: String::new(), top_k: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub record_id: String,
    pub score: String,
    pub chunk_text: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            record_id: "RecordId__c".to_string(),
            score: "score__c".to_string(),
            chunk_text: "Chunk__c".to_string(),
        }
    }
}

/// Body submitted to a query client: `{"sql": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub sql: String,
}

/// One row as returned by a query client.
///
/// Fields are optional because the wire format does not guarantee them;
/// the loader decides what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: Option<RecordId>,
    pub score: Option<f64>,
    pub payload: Option<String>,
}

impl ResultRow {
    pub fn new(id: impl Into<RecordId>, score: f64, payload: Option<&str>) -> Self {
        Self {
            id: Some(id.into()),
            score: Some(score),
            payload: payload.map(str::to_string),
        }
    }

    /// Payload text, or `None` when missing or equal to [`NULL_MARKER`].
    pub fn payload_text(&self) -> Option<&str> {
        self.payload.as_deref().filter(|p| *p != NULL_MARKER)
    }
}

/// A loaded document: chunk text plus `row_id`/`score` metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub text: String,
    pub metadata: Meta,
}

impl DocumentRecord {
    pub fn new(text: impl Into<String>, row_id: impl Into<RecordId>, score: f64) -> Self {
        let mut metadata = Meta::new();
        metadata.insert(META_ROW_ID.to_string(), serde_json::Value::String(row_id.into()));
        metadata.insert(META_SCORE.to_string(), serde_json::Value::from(score));
        Self { text: text.into(), metadata }
    }

    pub fn row_id(&self) -> Option<&str> {
        self.metadata.get(META_ROW_ID).and_then(serde_json::Value::as_str)
    }

    pub fn score(&self) -> Option<f64> {
        self.metadata.get(META_SCORE).and_then(serde_json::Value::as_f64)
    }
}

/// Per-call options for a load. No option is interpreted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
