use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::field_value::FieldValue;

/// A local roster row. The identifier is assigned by the external directory
/// and is never reused or renumbered on this side; everything else is
/// descriptive and optional.
///
/// Liveness (live vs. stale within one sync cycle) is store-side state, not
/// part of the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub individual_id: i64,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age_group: Option<String>,
    pub gender: Option<String>,
}

/// The six tracked descriptive fields, in the order deltas are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonField {
    Name,
    Birthday,
    Email,
    Phone,
    AgeGroup,
    Gender,
}

impl PersonField {
    pub const ALL: [PersonField; 6] = [
        PersonField::Name,
        PersonField::Birthday,
        PersonField::Email,
        PersonField::Phone,
        PersonField::AgeGroup,
        PersonField::Gender,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Birthday => "birthday",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::AgeGroup => "age_group",
            Self::Gender => "gender",
        }
    }
}

/// One field-level change between a stored row and an incoming candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub field: PersonField,
    pub old: FieldValue,
    pub new: FieldValue,
}

impl Person {
    pub fn field(&self, field: PersonField) -> FieldValue {
        match field {
            PersonField::Name => FieldValue::from_text(self.name.as_ref()),
            PersonField::Birthday => FieldValue::from_date(self.birthday),
            PersonField::Email => FieldValue::from_text(self.email.as_ref()),
            PersonField::Phone => FieldValue::from_text(self.phone.as_ref()),
            PersonField::AgeGroup => FieldValue::from_text(self.age_group.as_ref()),
            PersonField::Gender => FieldValue::from_text(self.gender.as_ref()),
        }
    }

    /// Compare every tracked field against `incoming` with exact equality.
    /// Returns deltas in `PersonField::ALL` order; empty means no change.
    pub fn diff(&self, incoming: &Person) -> Vec<FieldDelta> {
        PersonField::ALL
            .iter()
            .filter_map(|&field| {
                let old = self.field(field);
                let new = incoming.field(field);
                if old == new {
                    None
                } else {
                    Some(FieldDelta { field, old, new })
                }
            })
            .collect()
    }
}
