//! Demonstration participants.

use crate::domain::{Nominations, ParticipantId, ParticipantRecord};

const DEMO: [(&str, [&str; 3]); 3] = [
    ("101", ["102", "103", "104"]),
    ("102", ["101", "105", "106"]),
    ("103", ["107", "108", "109"]),
];

/// Participants used to populate an empty store for demonstrations.
///
/// `101` and `102` nominate each other; `103` matches no one.
///
/// # Panics
///
/// Never in practice: the built-in identifiers are all non-blank.
#[must_use]
pub fn demo_participants() -> Vec<ParticipantRecord> {
    DEMO.iter()
        .map(|(id, nominees)| {
            let id = ParticipantId::new(id).expect("demo identifiers are not blank");
            let nominations = Nominations::sanitize(Some(&id), nominees).nominations;
            ParticipantRecord::with_nominations(id, nominations)
        })
        .collect()
}
