use rostersync_core::{ChangeReport, Person};
use rostersync_engine::{SyncConfig, SyncEngine, SyncError};
use rostersync_storage::{PersonStore, SqlitePersonStore, StorageError};

use crate::directory::TestDirectory;

/// A reconciliation engine over a fresh in-memory store.
pub struct TestSync {
    pub engine: SyncEngine<SqlitePersonStore>,
}

impl TestSync {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            engine: SyncEngine::new(SqlitePersonStore::open_in_memory()?),
        })
    }

    pub fn with_config(config: SyncConfig) -> Result<Self, StorageError> {
        Ok(Self {
            engine: SyncEngine::with_config(SqlitePersonStore::open_in_memory()?, config),
        })
    }

    pub fn run(&mut self, directory: &TestDirectory) -> Result<ChangeReport, SyncError> {
        self.engine.run(directory)
    }

    /// Current store contents in identifier order.
    pub fn people(&self) -> Result<Vec<Person>, StorageError> {
        self.engine.store().list_all()
    }
}
