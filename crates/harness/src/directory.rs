use rostersync_core::{RawHousehold, RawPerson};
use rostersync_engine::{RosterSource, SourceError};

/// An in-memory roster source. Serves whatever households it holds, or
/// fails every fetch when constructed with `failing`.
pub struct TestDirectory {
    households: Vec<RawHousehold>,
    fail_reason: Option<String>,
}

impl Default for TestDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDirectory {
    pub fn new() -> Self {
        Self { households: Vec::new(), fail_reason: None }
    }

    pub fn with_households(households: Vec<RawHousehold>) -> Self {
        Self { households, fail_reason: None }
    }

    pub fn failing(reason: &str) -> Self {
        Self { households: Vec::new(), fail_reason: Some(reason.to_string()) }
    }

    pub fn set_households(&mut self, households: Vec<RawHousehold>) {
        self.households = households;
    }

    pub fn push_household(&mut self, household: RawHousehold) {
        self.households.push(household);
    }
}

impl RosterSource for TestDirectory {
    fn fetch_roster(&self) -> Result<Vec<RawHousehold>, SourceError> {
        match &self.fail_reason {
            Some(reason) => Err(SourceError::Unavailable { reason: reason.clone() }),
            None => Ok(self.households.clone()),
        }
    }
}

/// A minimal raw person record; tests set further fields directly.
pub fn person(individual_id: i64, name: &str) -> RawPerson {
    RawPerson {
        individual_id: Some(individual_id),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// A single-member household.
pub fn household(head: RawPerson) -> RawHousehold {
    RawHousehold { head_of_house: Some(head), ..Default::default() }
}

/// A full household: head, spouse, children.
pub fn family(head: RawPerson, spouse: RawPerson, children: Vec<RawPerson>) -> RawHousehold {
    RawHousehold {
        head_of_house: Some(head),
        spouse: Some(spouse),
        children,
        ..Default::default()
    }
}
