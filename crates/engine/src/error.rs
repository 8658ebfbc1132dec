use rostersync_storage::StorageError;
use thiserror::Error;

use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("sync already in progress for store: {0}")]
    SyncInProgress(String),
}
