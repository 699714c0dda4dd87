//! Loads text chunks from a remote analytical store as documents.
//!
//! [`ChunkLoader`] renders a vector-search/chunk-table join once, runs it
//! through an injected [`QueryClient`](dcloud_core::traits::QueryClient) and
//! maps each returned row to a [`DocumentRecord`](dcloud_core::types::DocumentRecord).

pub mod ident;
pub mod loader;
pub mod query;
pub mod replay;
pub mod rows;

pub use ident::Identifier;
pub use loader::{rows_to_documents, ChunkLoader};
pub use query::ChunkQuery;
pub use replay::ReplayClient;
pub use rows::{rows_from_batch, rows_from_batches};
