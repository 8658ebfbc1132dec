use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One household entry as fetched from the directory service. A household
/// groups a head-of-house with an optional spouse and any number of
/// children; each of the three is an independent person candidate.
///
/// Every named field is tolerated absent — a malformed household yields
/// fewer candidates, never a failed snapshot. Keys outside the known schema
/// land in `extra` for drift diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHousehold {
    #[serde(default)]
    pub head_of_house: Option<RawPerson>,
    #[serde(default)]
    pub spouse: Option<RawPerson>,
    #[serde(default)]
    pub children: Vec<RawPerson>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawHousehold {
    /// Head-of-house, spouse if present, then each child, in snapshot order.
    pub fn members(&self) -> impl Iterator<Item = &RawPerson> {
        self.head_of_house
            .iter()
            .chain(self.spouse.iter())
            .chain(self.children.iter())
    }
}

/// One person record as the directory serves it, before normalization.
/// Different source generations use different key names for the same
/// concept (`name`/`preferredName`/`displayName`, `birthDate`/`birthDay`,
/// `gender`/`sex`), so all variants are kept until the normalizer picks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
    #[serde(default)]
    pub individual_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<RawDate>,
    #[serde(default)]
    pub birth_day: Option<RawDate>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RawPerson {
    /// A label for diagnostics: whichever name variant is present, else the
    /// identifier, else a placeholder.
    pub fn label(&self) -> String {
        self.name
            .as_ref()
            .or(self.preferred_name.as_ref())
            .or(self.display_name.as_ref())
            .cloned()
            .unwrap_or_else(|| match self.individual_id {
                Some(id) => format!("#{id}"),
                None => "(unidentified)".to_string(),
            })
    }
}

/// A birth date as the wire carries it: older source generations send epoch
/// milliseconds, newer ones an ISO-8601 date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    EpochMillis(i64),
    Iso(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn members_flattens_in_order() {
        let household: RawHousehold = serde_json::from_value(json!({
            "headOfHouse": { "individualId": 1 },
            "spouse": { "individualId": 2 },
            "children": [ { "individualId": 3 }, { "individualId": 4 } ]
        }))
        .unwrap();

        let ids: Vec<Option<i64>> =
            household.members().map(|p| p.individual_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn missing_members_are_tolerated() {
        let household: RawHousehold = serde_json::from_value(json!({})).unwrap();
        assert_eq!(household.members().count(), 0);
    }

    #[test]
    fn birth_date_accepts_both_generations() {
        let old: RawPerson = serde_json::from_value(json!({
            "individualId": 5, "birthDate": 315532800000i64
        }))
        .unwrap();
        assert_eq!(old.birth_date, Some(RawDate::EpochMillis(315_532_800_000)));

        let new: RawPerson = serde_json::from_value(json!({
            "individualId": 5, "birthDate": "1980-01-01"
        }))
        .unwrap();
        assert_eq!(new.birth_date, Some(RawDate::Iso("1980-01-01".into())));
    }

    #[test]
    fn unknown_keys_are_captured_not_rejected() {
        let raw: RawPerson = serde_json::from_value(json!({
            "individualId": 7,
            "memberId": "000-1111-222",
            "surname": "Example"
        }))
        .unwrap();
        assert_eq!(raw.individual_id, Some(7));
        let keys: Vec<&str> = raw.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["memberId", "surname"]);
    }
}
