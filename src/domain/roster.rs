//! In-memory roster of participants
//!
//! The [`Roster`] knows nothing about persistence. It holds the participant
//! records and enforces the record invariants; the
//! [`Store`](crate::storage::Store) wraps it and writes every change through
//! to a backend.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::domain::{
    ParticipantId, ParticipantRecord,
    nominations::{Discarded, Nominations, Sanitized},
};

/// The set of known participants, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: BTreeMap<ParticipantId, ParticipantRecord>,
}

impl Roster {
    /// Look up a participant.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ParticipantRecord> {
        self.participants.get(id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.participants.contains_key(id)
    }

    /// Return the participant, registering them with no nominations if they
    /// are not known yet.
    ///
    /// The boolean is `true` when the record was created by this call.
    pub fn get_or_insert(&mut self, id: &ParticipantId) -> (&ParticipantRecord, bool) {
        let mut created = false;
        let record = self.participants.entry(id.clone()).or_insert_with(|| {
            created = true;
            ParticipantRecord::new(id.clone())
        });
        (record, created)
    }

    /// Replace a participant's nominations with the sanitized `candidates`.
    ///
    /// The participant is registered first if unknown. Returns what was
    /// dropped during sanitation alongside the previous nominations so the
    /// caller can undo or report the change.
    #[instrument(level = "debug", skip(self, candidates))]
    pub fn replace_nominations<I, S>(&mut self, id: &ParticipantId, candidates: I) -> Replaced
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Sanitized {
            nominations,
            discarded,
        } = Nominations::sanitize(Some(id), candidates);

        let record = self
            .participants
            .entry(id.clone())
            .or_insert_with(|| ParticipantRecord::new(id.clone()));
        let previous = record.nominations().clone();
        record.set_nominations(nominations);

        Replaced {
            record: record.clone(),
            previous,
            discarded,
        }
    }

    /// Insert a record, replacing any existing record with the same
    /// identifier.
    pub fn insert(&mut self, record: ParticipantRecord) -> Option<ParticipantRecord> {
        self.participants.insert(record.identifier().clone(), record)
    }

    /// Remove a record.
    ///
    /// Only used to undo a registration whose write failed.
    pub(crate) fn remove(&mut self, id: &str) -> Option<ParticipantRecord> {
        self.participants.remove(id)
    }

    /// The number of registered participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether no participants are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterate over all participants in identifier order.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn iter(&self) -> impl Iterator<Item = &ParticipantRecord> {
        self.participants.values()
    }
}

impl FromIterator<ParticipantRecord> for Roster {
    fn from_iter<T: IntoIterator<Item = ParticipantRecord>>(iter: T) -> Self {
        let mut roster = Self::default();
        for record in iter {
            roster.insert(record);
        }
        roster
    }
}

/// The outcome of [`Roster::replace_nominations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    /// The updated record.
    pub record: ParticipantRecord,
    /// The nominations held before the replacement.
    pub previous: Nominations,
    /// Candidates dropped during sanitation.
    pub discarded: Vec<Discarded>,
}
