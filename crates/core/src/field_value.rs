use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked field's value as it appears in a change delta. Absence is a
/// normal value here: `Null` vs `Text` is a reportable change, same as
/// `Text` vs `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn from_text(value: Option<&String>) -> Self {
        match value {
            Some(s) => FieldValue::Text(s.clone()),
            None => FieldValue::Null,
        }
    }

    pub fn from_date(value: Option<NaiveDate>) -> Self {
        match value {
            Some(d) => FieldValue::Date(d),
            None => FieldValue::Null,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "(none)"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Date(d) => write!(f, "{d}"),
        }
    }
}
