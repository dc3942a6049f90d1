//! Mutual nominations
//!
//! Participants each nominate up to three peers. A match is revealed only
//! when two participants have nominated each other.

pub mod domain;
pub use domain::{
    Config, EmptyIdentifierError, NOMINATION_LIMIT, Nominations, ParticipantId,
    ParticipantRecord, Roster, Submission, SubmissionError,
};

/// Durable storage of participants.
pub mod storage;
pub use storage::{Backend, FileBackend, MemoryBackend, PersistenceError, Store};

pub mod matching;
pub use matching::{NominationIndex, find_matches, mutual_pairs};

pub mod session;
pub use session::{Session, SessionError};
