pub mod config;
pub mod error;
pub mod normalize;
pub mod runlock;
pub mod source;

pub use config::SyncConfig;
pub use error::SyncError;
pub use source::{RosterSource, SourceError};

use std::time::Instant;

use tracing::{debug, info};

use rostersync_core::{ChangeReport, Outcome};
use rostersync_storage::{PersonStore, UpsertOutcome};

use crate::runlock::RunLock;

/// The reconciliation engine: one store, one three-phase sync protocol.
///
/// Each call to [`run`](SyncEngine::run) executes stage → merge → sweep
/// strictly in order against a freshly fetched snapshot. The engine is the
/// sole writer of person rows; overlapping cycles against the same store
/// are rejected up front.
pub struct SyncEngine<S: PersonStore> {
    store: S,
    config: SyncConfig,
}

impl<S: PersonStore> SyncEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store, config: SyncConfig::default() }
    }

    pub fn with_config(store: S, config: SyncConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Run one sync cycle and return the change report.
    ///
    /// The snapshot is fetched before any store mutation: a source failure
    /// aborts the cycle with the store untouched, so staging is never left
    /// behind unreconciled. A storage failure aborts the remaining phases;
    /// the next cycle's stage re-establishes a consistent baseline from
    /// whatever was left live.
    pub fn run(&mut self, source: &dyn RosterSource) -> Result<ChangeReport, SyncError> {
        let _guard = RunLock::acquire(self.store.identity())?;
        let started = Instant::now();
        info!(store = self.store.identity(), "starting sync cycle");

        let households = source.fetch_roster()?;
        let batch = normalize::normalize_snapshot(&households, &self.config);
        debug!(
            candidates = batch.candidates.len(),
            skipped_invalid = batch.skipped_invalid,
            "normalized snapshot"
        );

        let staged = self.store.stage_all()?;
        debug!(staged, "staged live rows");

        let mut entries = Vec::with_capacity(batch.candidates.len());
        for person in batch.candidates {
            let existing = self.store.lookup(person.individual_id)?;
            // The write is unconditional even when nothing changed: it also
            // clears the stale marker set by the stage phase.
            let written = self.store.upsert(&person)?;
            let outcome = match existing {
                None => {
                    debug_assert_eq!(written, UpsertOutcome::Inserted);
                    Outcome::added(person)
                }
                Some(previous) => {
                    debug_assert_eq!(written, UpsertOutcome::Updated);
                    let deltas = previous.diff(&person);
                    if deltas.is_empty() {
                        Outcome::no_change(person)
                    } else {
                        Outcome::changed(person, deltas)
                    }
                }
            };
            debug!(
                individual_id = outcome.person.individual_id,
                kind = outcome.kind.as_str(),
                "merged candidate"
            );
            entries.push(outcome);
        }

        for person in self.store.sweep()? {
            debug!(individual_id = person.individual_id, "removed stale row");
            entries.push(Outcome::removed(person));
        }

        let report = ChangeReport::from_entries(entries, batch.skipped_invalid);
        info!(
            store = self.store.identity(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            added = report.tally.added,
            changed = report.tally.changed,
            no_change = report.tally.no_change,
            removed = report.tally.removed,
            skipped_invalid = report.skipped_invalid,
            "sync cycle complete"
        );
        Ok(report)
    }
}
