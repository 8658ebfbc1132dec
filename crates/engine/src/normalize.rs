use chrono::{DateTime, NaiveDate};
use tracing::warn;

use rostersync_core::{Person, RawDate, RawHousehold, RawPerson};

use crate::config::SyncConfig;

/// The flattened, validated view of one snapshot: person candidates in
/// snapshot order, plus the count of records rejected for a missing or
/// non-positive identifier.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub candidates: Vec<Person>,
    pub skipped_invalid: usize,
}

/// Flatten every household into independent person candidates. Household
/// roles (head-of-house, spouse, child) end here; the engine never sees
/// them.
pub fn normalize_snapshot(households: &[RawHousehold], config: &SyncConfig) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for household in households {
        if config.log_schema_drift {
            household_drift(household);
        }
        for raw in household.members() {
            if config.log_schema_drift {
                person_drift(raw);
            }
            match normalize(raw) {
                Some(person) => batch.candidates.push(person),
                None => batch.skipped_invalid += 1,
            }
        }
    }
    batch
}

/// Map one raw record to a person candidate. Returns `None` only when the
/// identifier is missing or non-positive (the directory uses non-positive
/// placeholders for incomplete sub-records); a failed coercion of any
/// optional field degrades that one field to absent instead.
pub fn normalize(raw: &RawPerson) -> Option<Person> {
    let individual_id = match raw.individual_id {
        Some(id) if id > 0 => id,
        other => {
            warn!(
                record = %raw.label(),
                individual_id = ?other,
                "skipping record without a valid identifier"
            );
            return None;
        }
    };

    let birthday = raw
        .birth_date
        .as_ref()
        .or(raw.birth_day.as_ref())
        .and_then(|d| coerce_date(d, individual_id));

    Some(Person {
        individual_id,
        name: raw
            .name
            .as_ref()
            .or(raw.preferred_name.as_ref())
            .or(raw.display_name.as_ref())
            .cloned(),
        birthday,
        email: raw.email.clone(),
        phone: raw.phone.clone(),
        age_group: raw.age_group.clone(),
        gender: raw.gender.clone().or_else(|| raw.sex.clone()),
    })
}

fn coerce_date(raw: &RawDate, individual_id: i64) -> Option<NaiveDate> {
    match raw {
        RawDate::Iso(s) => match s.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(e) => {
                warn!(individual_id, value = %s, error = %e, "unparseable birthday, storing without one");
                None
            }
        },
        RawDate::EpochMillis(ms) => match DateTime::from_timestamp_millis(*ms) {
            Some(ts) => Some(ts.date_naive()),
            None => {
                warn!(individual_id, millis = *ms, "birthday timestamp out of range, storing without one");
                None
            }
        },
    }
}

fn household_drift(household: &RawHousehold) {
    if !household.extra.is_empty() {
        let keys: Vec<&str> = household.extra.keys().map(String::as_str).collect();
        let label = household
            .head_of_house
            .as_ref()
            .map(RawPerson::label)
            .unwrap_or_else(|| "(no head of house)".to_string());
        warn!(household = %label, ?keys, "household carries unexpected keys");
    }
    if household.head_of_house.is_none() {
        warn!("household without a head of house");
    }
}

fn person_drift(raw: &RawPerson) {
    if !raw.extra.is_empty() {
        let keys: Vec<&str> = raw.extra.keys().map(String::as_str).collect();
        warn!(record = %raw.label(), ?keys, "record carries unexpected keys");
    }
    if raw.name.is_none() && raw.preferred_name.is_none() && raw.display_name.is_none() {
        warn!(record = %raw.label(), "record has no name under any known key");
    }
}
