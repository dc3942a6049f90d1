//! A participant's session: login, submit, see matches.
//!
//! This is the caller boundary. Identifiers are parsed and submissions
//! validated here before anything reaches the [`Store`].

use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{EmptyIdentifierError, ParticipantId, ParticipantRecord, Submission, SubmissionError},
    matching::find_matches,
    storage::{Backend, PersistenceError, Store},
};

/// Errors surfaced to a participant during a session.
///
/// Everything except [`SessionError::Persistence`] is fixed by asking for
/// corrected input.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The login identifier was blank.
    #[error(transparent)]
    EmptyIdentifier(#[from] EmptyIdentifierError),
    /// The submission broke a nomination rule.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    /// The store could not be written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// A logged-in participant.
#[derive(Debug)]
pub struct Session<'s, B> {
    store: &'s mut Store<B>,
    record: ParticipantRecord,
}

impl<'s, B: Backend> Session<'s, B> {
    /// Log in as `identifier`, registering the participant on first login.
    ///
    /// # Errors
    ///
    /// Fails if the identifier is blank or a new registration cannot be
    /// persisted.
    #[instrument(level = "debug", skip(store))]
    pub fn login(store: &'s mut Store<B>, identifier: &str) -> Result<Self, SessionError> {
        let id = ParticipantId::new(identifier)?;
        let record = store.get_or_create(&id)?;
        Ok(Self { store, record })
    }

    /// The logged-in participant.
    #[must_use]
    pub const fn participant(&self) -> &ParticipantId {
        self.record.identifier()
    }

    /// The participant's record as of the last login or submission.
    #[must_use]
    pub const fn record(&self) -> &ParticipantRecord {
        &self.record
    }

    /// The participant's current matches.
    #[must_use]
    pub fn matches(&self) -> Vec<ParticipantId> {
        find_matches(self.store.roster(), self.participant())
    }

    /// Submit a new set of nominations and return the refreshed matches.
    ///
    /// # Errors
    ///
    /// Fails without touching the store if the entries do not name exactly
    /// three distinct peers other than the participant, or if the change
    /// cannot be persisted.
    #[instrument(level = "debug", skip(self, entries), fields(participant = %self.participant()))]
    pub fn submit<I, S>(&mut self, entries: I) -> Result<Vec<ParticipantId>, SessionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let submission = Submission::parse(self.participant(), entries)?;
        self.record = self
            .store
            .replace_nominations(submission.submitter(), submission.nominees())?;
        Ok(self.matches())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::seed::demo_participants, storage::MemoryBackend};

    fn store() -> Store<MemoryBackend> {
        Store::open(MemoryBackend::new()).unwrap()
    }

    #[test]
    fn blank_login_is_rejected_before_the_store() {
        let mut store = store();
        let error = Session::login(&mut store, "   ").unwrap_err();
        assert!(matches!(error, SessionError::EmptyIdentifier(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn login_trims_and_registers() {
        let mut store = store();
        let session = Session::login(&mut store, " 101 ").unwrap();
        assert_eq!(session.participant().as_str(), "101");
        assert!(session.record().nominations().is_empty());
        assert!(session.matches().is_empty());
        assert!(store.read(&ParticipantId::new("101").unwrap()).is_some());
    }

    #[test]
    fn invalid_submission_leaves_store_untouched() {
        let mut store = store();
        let mut session = Session::login(&mut store, "101").unwrap();
        session.submit(["102", "103", "104"]).unwrap();

        let error = session.submit(["101", "102", "102"]).unwrap_err();

        assert!(matches!(
            error,
            SessionError::Submission(SubmissionError::DuplicateNomination(_))
        ));
        assert_eq!(session.record().nominations().len(), 3);
        drop(session);
        assert_eq!(store.read(&ParticipantId::new("101").unwrap()).unwrap().nominations().len(), 3);
    }

    #[test]
    fn submit_reports_new_match() {
        let mut store = store();
        store.seed_if_empty(demo_participants()).unwrap();

        let mut session = Session::login(&mut store, "103").unwrap();
        assert!(session.matches().is_empty());

        let matches = session.submit(["101", "104", "105"]).unwrap();
        let matches: Vec<_> = matches.iter().map(ParticipantId::as_str).collect();
        assert_eq!(matches, ["101"]);

        drop(session);
        let mut session = Session::login(&mut store, "104").unwrap();
        let matches = session.submit(["101", "103", "106"]).unwrap();
        let matches: Vec<_> = matches.iter().map(ParticipantId::as_str).collect();
        assert_eq!(matches, ["101", "103"]);
    }
}
