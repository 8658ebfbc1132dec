use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::person::{FieldDelta, Person};

/// Classification of one person's result for one sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Added,
    Changed,
    NoChange,
    Removed,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Changed => "changed",
            Self::NoChange => "no-change",
            Self::Removed => "removed",
        }
    }
}

/// One entry of the change report. `person` carries the new field values
/// for added/changed/no-change entries and the last-known values for
/// removed ones; `deltas` is populated only for `Changed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: ChangeKind,
    pub person: Person,
    pub deltas: Vec<FieldDelta>,
}

impl Outcome {
    pub fn added(person: Person) -> Self {
        Self { kind: ChangeKind::Added, person, deltas: Vec::new() }
    }

    pub fn changed(person: Person, deltas: Vec<FieldDelta>) -> Self {
        Self { kind: ChangeKind::Changed, person, deltas }
    }

    pub fn no_change(person: Person) -> Self {
        Self { kind: ChangeKind::NoChange, person, deltas: Vec::new() }
    }

    pub fn removed(person: Person) -> Self {
        Self { kind: ChangeKind::Removed, person, deltas: Vec::new() }
    }
}

/// Per-kind outcome counts for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTally {
    pub added: usize,
    pub changed: usize,
    pub no_change: usize,
    pub removed: usize,
}

impl ReportTally {
    pub fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Added => self.added += 1,
            ChangeKind::Changed => self.changed += 1,
            ChangeKind::NoChange => self.no_change += 1,
            ChangeKind::Removed => self.removed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.changed + self.no_change + self.removed
    }
}

/// The full result of one sync cycle, handed to the notifier by the caller
/// when `has_changes()` is true. `skipped_invalid` counts snapshot records
/// rejected for a missing or non-positive identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeReport {
    pub run_id: Uuid,
    pub tally: ReportTally,
    pub entries: Vec<Outcome>,
    pub skipped_invalid: usize,
}

impl ChangeReport {
    pub fn from_entries(entries: Vec<Outcome>, skipped_invalid: usize) -> Self {
        let mut tally = ReportTally::default();
        for entry in &entries {
            tally.record(entry.kind);
        }
        Self { run_id: Uuid::now_v7(), tally, entries, skipped_invalid }
    }

    /// True when the cycle produced at least one added, changed, or removed
    /// entry. A cycle of pure no-change outcomes triggers no notification.
    pub fn has_changes(&self) -> bool {
        self.tally.added + self.tally.changed + self.tally.removed > 0
    }
}
