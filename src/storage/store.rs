//! A durable store of participants
//!
//! The [`Store`] wraps the persistence-agnostic [`Roster`] and writes the
//! whole snapshot through to a [`Backend`] on every change.

use std::io;

use tracing::instrument;

use crate::{
    domain::{ParticipantId, ParticipantRecord, Roster},
    storage::{
        backend::Backend,
        document::{Document, Extras},
    },
};

/// A durable store of participant records.
#[derive(Debug)]
pub struct Store<B> {
    backend: B,
    roster: Roster,
    extras: Extras,
}

/// Errors raised when the store document cannot be read or written.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The backend failed.
    #[error("store document I/O failed")]
    Io(#[from] io::Error),
    /// The snapshot could not be serialized.
    #[error("failed to serialize the store document")]
    Serialize(#[from] serde_json::Error),
}

impl<B: Backend> Store<B> {
    /// Open the store kept in `backend`.
    ///
    /// An absent document yields an empty store. So does a malformed one,
    /// including one that is not UTF-8, after logging a warning; it is
    /// replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend holds a document that cannot be
    /// read.
    pub fn open(backend: B) -> Result<Self, PersistenceError> {
        let (roster, extras) = match backend.load()? {
            None => {
                tracing::debug!("No store document found, starting empty");
                (Roster::default(), Extras::default())
            }
            Some(json) => match Document::parse(&json) {
                Ok(document) => document.into_roster(),
                Err(e) => {
                    tracing::warn!("Ignoring malformed store document: {e}");
                    (Roster::default(), Extras::default())
                }
            },
        };

        tracing::debug!("Loaded {} participants", roster.len());

        Ok(Self {
            backend,
            roster,
            extras,
        })
    }

    /// Return the participant, registering them with no nominations if they
    /// are not known yet.
    ///
    /// Calling this for a known participant returns their current state and
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a new registration cannot be persisted. The store
    /// is left unchanged in that case.
    #[instrument(level = "debug", skip(self))]
    pub fn get_or_create(
        &mut self,
        id: &ParticipantId,
    ) -> Result<ParticipantRecord, PersistenceError> {
        let (record, created) = self.roster.get_or_insert(id);
        let record = record.clone();

        if created {
            if let Err(e) = self.flush() {
                self.roster.remove(id);
                return Err(e);
            }
            tracing::info!("Registered participant {id}");
        }

        Ok(record)
    }

    /// Replace a participant's nominations.
    ///
    /// Candidates are trimmed; blank entries, self-nominations and repeats
    /// are dropped, as is anything past the nomination limit. Each dropped
    /// entry is logged as a warning. An unknown participant is registered.
    ///
    /// This is a floor, not the acceptance rule: submissions should be
    /// validated with [`Submission`](crate::domain::Submission) first.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted. The previous
    /// nominations are restored in that case.
    #[instrument(level = "debug", skip(self, candidates))]
    pub fn replace_nominations<I, S>(
        &mut self,
        id: &ParticipantId,
        candidates: I,
    ) -> Result<ParticipantRecord, PersistenceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let existed = self.roster.contains(id);
        let replaced = self.roster.replace_nominations(id, candidates);

        for discarded in &replaced.discarded {
            tracing::warn!("Discarded nomination from {id}: {discarded}");
        }

        if let Err(e) = self.flush() {
            if existed {
                self.roster.insert(ParticipantRecord::with_nominations(
                    id.clone(),
                    replaced.previous,
                ));
            } else {
                self.roster.remove(id);
            }
            return Err(e);
        }

        tracing::info!(
            "Saved {} nominations for {id}",
            replaced.record.nominations().len()
        );

        Ok(replaced.record)
    }

    /// Look up a participant without changing anything.
    ///
    /// Takes a parsed identifier, so lookups are trimmed the same way as
    /// registrations and a blank identifier never reaches the store.
    #[must_use]
    pub fn read(&self, id: &ParticipantId) -> Option<&ParticipantRecord> {
        self.roster.get(id)
    }

    /// Insert `records` verbatim if, and only if, the store is empty.
    ///
    /// Returns `true` if the records were inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the seeded store cannot be persisted. The store is
    /// left empty in that case.
    #[instrument(level = "debug", skip_all)]
    pub fn seed_if_empty<I>(&mut self, records: I) -> Result<bool, PersistenceError>
    where
        I: IntoIterator<Item = ParticipantRecord>,
    {
        if !self.roster.is_empty() {
            tracing::debug!("Store already populated, not seeding");
            return Ok(false);
        }

        self.roster = records.into_iter().collect();

        if let Err(e) = self.flush() {
            self.roster = Roster::default();
            return Err(e);
        }

        tracing::info!("Seeded store with {} participants", self.roster.len());
        Ok(true)
    }

    /// The current snapshot of participants.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The number of registered participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Whether no participants are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// The backend the store writes to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        let json = Document::from_roster(&self.roster, &self.extras).to_json()?;
        self.backend.persist(&json)?;
        Ok(())
    }
}
