use crate::types::{DocumentRecord, QueryRequest, ResultRow};

/// Executes read queries against the remote store.
///
/// A call is all-or-nothing: either every row of the result or an error.
pub trait QueryClient: Send + Sync {
    fn read_data(&self, request: &QueryRequest) -> anyhow::Result<Vec<ResultRow>>;
}

/// Anything that can produce documents without further arguments.
pub trait DocumentReader: Send + Sync {
    fn load(&self) -> anyhow::Result<Vec<DocumentRecord>>;
}

impl<C: QueryClient + ?Sized> QueryClient for &C {
    fn read_data(&self, request: &QueryRequest) -> anyhow::Result<Vec<ResultRow>> {
        (**self).read_data(request)
    }
}

impl<C: QueryClient + ?Sized> QueryClient for Box<C> {
    fn read_data(&self, request: &QueryRequest) -> anyhow::Result<Vec<ResultRow>> {
        (**self).read_data(request)
    }
}

impl<C: QueryClient + ?Sized> QueryClient for std::sync::Arc<C> {
    fn read_data(&self, request: &QueryRequest) -> anyhow::Result<Vec<ResultRow>> {
        (**self).read_data(request)
    }
}
