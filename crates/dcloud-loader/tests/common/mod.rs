#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use dcloud_core::traits::QueryClient;
use dcloud_core::types::{ChunkLoaderConfig, QueryRequest, ResultRow};

pub fn scenario_config() -> ChunkLoaderConfig {
    ChunkLoaderConfig::new("ds1", "Chunk__dlm", "Vec__dlm", "body__c")
}

/// Error a failing stub hands back, so tests can downcast to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDown(pub String);

impl fmt::Display for StoreDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query service unavailable: {}", self.0)
    }
}

impl std::error::Error for StoreDown {}

pub struct StubClient {
    rows: Option<Vec<ResultRow>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<QueryRequest>>,
}

impl StubClient {
    pub fn returning(rows: Vec<ResultRow>) -> Self {
        Self { rows: Some(rows), calls: AtomicUsize::new(0), requests: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        Self { rows: None, calls: AtomicUsize::new(0), requests: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    pub fn requests(&self) -> Vec<QueryRequest> { self.requests.lock().unwrap().clone() }
}

impl QueryClient for StubClient {
    fn read_data(&self, request: &QueryRequest) -> anyhow::Result<Vec<ResultRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.rows {
            Some(rows) => Ok(rows.clone()),
            None => Err(StoreDown("503".to_string()).into()),
        }
    }
}
