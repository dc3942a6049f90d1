//! Validation of a nomination submission at the caller boundary.
//!
//! The store sanitizes whatever it is given, but a submission is only
//! accepted when it names exactly [`NOMINATION_LIMIT`] distinct peers, none
//! of whom is the submitter.

use thiserror::Error;

use crate::domain::{ParticipantId, nominations::NOMINATION_LIMIT};

/// A validated nomination submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    submitter: ParticipantId,
    nominees: Vec<ParticipantId>,
}

/// Reasons a submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// After trimming and removing blank entries the submission did not hold
    /// the required number of nominees.
    #[error("expected exactly {expected} nominations, found {found}")]
    InvalidNominationCount {
        /// The required number of nominations.
        expected: usize,
        /// The number of non-blank entries submitted.
        found: usize,
    },
    /// The same participant was nominated more than once.
    #[error("{0} was nominated more than once")]
    DuplicateNomination(ParticipantId),
    /// The submitter nominated themselves.
    #[error("participants cannot nominate themselves")]
    SelfNomination,
}

impl Submission {
    /// Validate raw entries submitted by `submitter`.
    ///
    /// Entries are trimmed and blank ones ignored before the count check.
    ///
    /// # Errors
    ///
    /// Checks run in order: count, then duplicates, then self-nomination.
    /// The first failing rule is returned.
    pub fn parse<I, S>(submitter: &ParticipantId, entries: I) -> Result<Self, SubmissionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nominees: Vec<ParticipantId> = entries
            .into_iter()
            .filter_map(|entry| ParticipantId::new(entry).ok())
            .collect();

        if nominees.len() != NOMINATION_LIMIT {
            return Err(SubmissionError::InvalidNominationCount {
                expected: NOMINATION_LIMIT,
                found: nominees.len(),
            });
        }

        for (i, nominee) in nominees.iter().enumerate() {
            if nominees[..i].contains(nominee) {
                return Err(SubmissionError::DuplicateNomination(nominee.clone()));
            }
        }

        if nominees.contains(submitter) {
            return Err(SubmissionError::SelfNomination);
        }

        Ok(Self {
            submitter: submitter.clone(),
            nominees,
        })
    }

    /// The participant making the submission.
    #[must_use]
    pub const fn submitter(&self) -> &ParticipantId {
        &self.submitter
    }

    /// The nominated participants, in submission order.
    #[must_use]
    pub fn nominees(&self) -> &[ParticipantId] {
        &self.nominees
    }
}
