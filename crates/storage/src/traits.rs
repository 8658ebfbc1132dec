use rostersync_core::Person;

use crate::error::StorageError;

/// Per-row liveness within one sync cycle. Every row starts `Live`; the
/// stage phase flips live rows to `Stale`, the merge phase resurrects the
/// ones still present upstream, and the sweep phase deletes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Live,
    Stale,
}

impl Liveness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Stale => "stale",
        }
    }

    pub fn parse(s: &str) -> Result<Self, StorageError> {
        match s {
            "live" => Ok(Self::Live),
            "stale" => Ok(Self::Stale),
            _ => Err(StorageError::Serialization(format!("unknown liveness: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// The store-adapter contract for the reconciliation engine. Any backing
/// engine works as long as each operation is individually atomic; no
/// cross-operation transaction is assumed.
pub trait PersonStore {
    /// A stable key identifying this store, used for run-level mutual
    /// exclusion between sync cycles.
    fn identity(&self) -> &str;

    /// Mark every live row stale in one bulk update. Reversible — no data
    /// is deleted. Returns the number of rows staged.
    fn stage_all(&mut self) -> Result<u64, StorageError>;

    /// Point lookup by identifier, regardless of liveness: a stale row is
    /// still found, so the merge phase can resurrect it.
    fn lookup(&self, individual_id: i64) -> Result<Option<Person>, StorageError>;

    /// Insert the row live, or overwrite every tracked field and set the
    /// row live unconditionally. The write happens even when the incoming
    /// values are identical; it clears the stale marker.
    fn upsert(&mut self, person: &Person) -> Result<UpsertOutcome, StorageError>;

    /// Read all stale rows, then delete them, atomically. Returns the
    /// deleted rows' last-known values in identifier order.
    fn sweep(&mut self) -> Result<Vec<Person>, StorageError>;

    /// Every stored row in identifier order.
    fn list_all(&self) -> Result<Vec<Person>, StorageError>;
}
