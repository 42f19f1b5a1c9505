use std::fmt;

use crate::backend::{self, BackendError, LocalGraphArgs};

use super::types::GraphData;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphFetchError {
    /// No vault has been opened yet.
    NoVault,
    Backend(BackendError),
}

impl fmt::Display for GraphFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFetchError::NoVault => write!(f, "no vault is open"),
            GraphFetchError::Backend(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for GraphFetchError {}

impl From<BackendError> for GraphFetchError {
    fn from(err: BackendError) -> Self {
        GraphFetchError::Backend(err)
    }
}

/// Source of local graphs for a note.
#[allow(async_fn_in_trait)]
pub trait GraphDataClient {
    async fn get_local_graph(&self, path: &str) -> Result<GraphData, GraphFetchError>;
}

/// Fetches through the desktop backend's `get_local_graph` command.
#[derive(Clone, Debug)]
pub struct TauriGraphClient {
    vault_path: String,
}

impl TauriGraphClient {
    pub fn new(vault_path: impl Into<String>) -> Self {
        Self {
            vault_path: vault_path.into(),
        }
    }
}

impl GraphDataClient for TauriGraphClient {
    async fn get_local_graph(&self, path: &str) -> Result<GraphData, GraphFetchError> {
        if self.vault_path.is_empty() {
            return Err(GraphFetchError::NoVault);
        }
        let args = LocalGraphArgs {
            vault_path: &self.vault_path,
            path,
        };
        Ok(backend::call("get_local_graph", &args).await?)
    }
}
