//! Domain models for mutual nominations.
//!
//! This module contains the core domain types: participant identifiers and
//! records, nomination lists, submission validation, the in-memory roster and
//! configuration.

/// Participant identifiers and records.
pub mod participant;
pub use participant::{EmptyIdentifierError, ParticipantId, ParticipantRecord};

pub mod nominations;
pub use nominations::{Discarded, NOMINATION_LIMIT, Nominations};

pub mod submission;
pub use submission::{Submission, SubmissionError};

pub mod roster;
pub use roster::Roster;

pub mod seed;

mod config;
pub use config::Config;
