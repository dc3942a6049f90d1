//! The persisted JSON document.
//!
//! The whole store is saved as a single document of the shape
//!
//! ```json
//! { "users": { "101": { "rollNumber": "101", "choices": ["102", "103", "104"] } } }
//! ```
//!
//! Decoding is schema-validated: anything that does not fit the shape is
//! rejected as a whole, and individual entries that break the store
//! invariants are dropped or repaired with a warning.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Nominations, ParticipantId, ParticipantRecord, Roster};

/// The on-disk shape of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Document {
    users: BTreeMap<String, StoredProfile>,

    /// Top-level fields this version does not know about.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredProfile {
    #[serde(rename = "rollNumber")]
    roll_number: String,

    choices: Vec<String>,

    /// Per-participant fields this version does not know about. They are
    /// written back untouched.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Fields carried through from the document that have no place in the
/// domain model.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Extras {
    document: Map<String, Value>,
    participants: BTreeMap<ParticipantId, Map<String, Value>>,
}

impl Document {
    /// Decode a document. Bytes that are not UTF-8 are rejected like any
    /// other malformed input.
    pub(crate) fn parse(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }

    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Build the document for the given roster.
    pub(crate) fn from_roster(roster: &Roster, extras: &Extras) -> Self {
        let users = roster
            .iter()
            .map(|record| {
                let id = record.identifier();
                let profile = StoredProfile {
                    roll_number: id.to_string(),
                    choices: record.nominations().iter().map(ToString::to_string).collect(),
                    extra: extras.participants.get(id).cloned().unwrap_or_default(),
                };
                (id.to_string(), profile)
            })
            .collect();

        Self {
            users,
            extra: extras.document.clone(),
        }
    }

    /// Convert into a roster, dropping or repairing entries that break the
    /// store invariants.
    pub(crate) fn into_roster(self) -> (Roster, Extras) {
        let mut roster = Roster::default();
        let mut extras = Extras {
            document: self.extra,
            participants: BTreeMap::new(),
        };

        for (key, profile) in self.users {
            let Ok(id) = ParticipantId::new(&key) else {
                tracing::warn!("Skipping participant with a blank identifier");
                continue;
            };

            if id.as_str() != key || profile.roll_number != key {
                tracing::warn!(
                    "Skipping participant '{key}': record identifier '{}' does not match its key",
                    profile.roll_number
                );
                continue;
            }

            let sanitized = Nominations::sanitize(Some(&id), &profile.choices);
            for discarded in &sanitized.discarded {
                tracing::warn!("Repaired stored nominations of {id}: dropped {discarded}");
            }

            if !profile.extra.is_empty() {
                extras.participants.insert(id.clone(), profile.extra);
            }
            roster.insert(ParticipantRecord::with_nominations(id, sanitized.nominations));
        }

        (roster, extras)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn decode(value: &Value) -> (Roster, Extras) {
        Document::parse(value.to_string().as_bytes()).unwrap().into_roster()
    }

    #[test]
    fn decodes_well_formed_document() {
        let (roster, _) = decode(&json!({
            "users": {
                "101": { "rollNumber": "101", "choices": ["102", "103", "104"] },
                "102": { "rollNumber": "102", "choices": [] }
            }
        }));

        assert_eq!(roster.len(), 2);
        let record = roster.get("101").unwrap();
        assert_eq!(
            record.nominations().as_slice(),
            &[id("102"), id("103"), id("104")]
        );
        assert!(roster.get("102").unwrap().nominations().is_empty());
    }

    #[test]
    fn rejects_wrong_shapes() {
        for value in [
            json!([]),
            json!({}),
            json!({ "users": [] }),
            json!({ "users": { "101": { "rollNumber": 101, "choices": [] } } }),
            json!({ "users": { "101": { "rollNumber": "101" } } }),
            json!({ "users": { "101": { "rollNumber": "101", "choices": "102" } } }),
        ] {
            assert!(Document::parse(value.to_string().as_bytes()).is_err(), "{value}");
        }
    }

    #[test]
    fn drops_entries_whose_key_disagrees() {
        let (roster, _) = decode(&json!({
            "users": {
                "101": { "rollNumber": "999", "choices": [] },
                " 102": { "rollNumber": " 102", "choices": [] },
                "": { "rollNumber": "", "choices": [] },
                "103": { "rollNumber": "103", "choices": [] }
            }
        }));

        let ids: Vec<_> = roster.iter().map(|r| r.identifier().as_str()).collect();
        assert_eq!(ids, ["103"]);
    }

    #[test]
    fn repairs_stored_nominations() {
        let (roster, _) = decode(&json!({
            "users": {
                "101": { "rollNumber": "101", "choices": ["101", "102", "102", " ", "103"] }
            }
        }));

        assert_eq!(
            roster.get("101").unwrap().nominations().as_slice(),
            &[id("102"), id("103")]
        );
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let original = json!({
            "schema": "legacy",
            "users": {
                "101": { "rollNumber": "101", "choices": ["102"], "nickname": "ace" }
            }
        });
        let (roster, extras) = decode(&original);

        let written = Document::from_roster(&roster, &extras).to_json().unwrap();
        let written: Value = serde_json::from_str(&written).unwrap();

        assert_eq!(written, original);
    }
}
