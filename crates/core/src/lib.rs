pub mod field_value;
pub mod person;
pub mod report;
pub mod roster;

pub use field_value::FieldValue;
pub use person::{FieldDelta, Person, PersonField};
pub use report::{ChangeKind, ChangeReport, Outcome, ReportTally};
pub use roster::{RawDate, RawHousehold, RawPerson};
