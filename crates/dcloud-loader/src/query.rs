//! Chunk query construction.
//!
//! Joins a `vector_search` result set against the chunk table on the record id.

use dcloud_core::error::{Error, Result};
use dcloud_core::types::{ChunkLoaderConfig, QueryRequest};

use crate::ident::Identifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkQuery {
    vector_table: Identifier,
    chunk_table: Identifier,
    text_column: Identifier,
    record_id: Identifier,
    score: Identifier,
    chunk_text: Identifier,
    search_query: String,
    top_k: u32,
}

impl ChunkQuery {
    pub fn from_config(config: &ChunkLoaderConfig) -> Result<Self> {
        if config.search.top_k == 0 {
            return Err(Error::InvalidConfig("search.top_k must be at least 1".to_string()));
        }
        Ok(Self {
            vector_table: Identifier::parse("vector_table", &config.vector_table)?,
            chunk_table: Identifier::parse("chunk_table", &config.chunk_table)?,
            text_column: Identifier::parse("text_column", &config.text_column)?,
            record_id: Identifier::parse("columns.record_id", &config.columns.record_id)?,
            score: Identifier::parse("columns.score", &config.columns.score)?,
            chunk_text: Identifier::parse("columns.chunk_text", &config.columns.chunk_text)?,
            search_query: config.search.query.clone(),
            top_k: config.search.top_k,
        })
    }

    pub fn to_sql(&self) -> String {
        format!(
            "SELECT\n    index.{rid},\n    index.{score},\n    chunk.{text}\n\
             FROM\n    vector_search(TABLE({vector}), '{column}', {query}, {k}) AS index\n\
             JOIN\n    {chunk} AS chunk\n\
             ON\n    index.{rid} = chunk.{rid}",
            rid = self.record_id,
            score = self.score,
            text = self.chunk_text,
            vector = self.vector_table,
            column = self.text_column,
            query = quote_literal(&self.search_query),
            k = self.top_k,
            chunk = self.chunk_table,
        )
    }

    pub fn request(&self) -> QueryRequest {
        QueryRequest { sql: self.to_sql() }
    }
}

/// Single-quoted SQL string literal with embedded quotes doubled.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_literal_doubles_quotes() {
        assert_eq!(quote_literal(""), "''");
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal("''"), "''''''");
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let config =
            ChunkLoaderConfig::new("ds1", "Chunk__dlm", "Vec__dlm", "body__c").with_search("", 0);
        assert!(matches!(ChunkQuery::from_config(&config), Err(Error::InvalidConfig(_))));
    }
}
