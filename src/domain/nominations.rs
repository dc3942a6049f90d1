//! The nomination list and its sanitation rule.

use std::fmt;

use crate::domain::ParticipantId;

/// The maximum number of peers a participant may nominate.
pub const NOMINATION_LIMIT: usize = 3;

/// An ordered list of nominated participants.
///
/// Holds at most [`NOMINATION_LIMIT`] entries and never the same identifier
/// twice. Order follows submission order and carries no meaning for
/// matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nominations(Vec<ParticipantId>);

/// Why a candidate entry was dropped during sanitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discarded {
    /// The entry was empty after trimming.
    Blank,
    /// The entry named the nominating participant.
    SelfNomination(ParticipantId),
    /// The entry repeated an earlier one.
    Duplicate(ParticipantId),
    /// The list was already full.
    OverLimit(ParticipantId),
}

impl fmt::Display for Discarded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "blank entry"),
            Self::SelfNomination(id) => write!(f, "self-nomination of {id}"),
            Self::Duplicate(id) => write!(f, "duplicate of {id}"),
            Self::OverLimit(id) => {
                write!(f, "{id} exceeds the limit of {NOMINATION_LIMIT}")
            }
        }
    }
}

/// The result of sanitizing a candidate list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanitized {
    /// The surviving nominations.
    pub nominations: Nominations,
    /// Everything that was dropped, in input order.
    pub discarded: Vec<Discarded>,
}

impl Nominations {
    /// Sanitize a raw candidate list.
    ///
    /// Each entry is trimmed; blank entries, entries equal to `owner` and
    /// repeats are dropped (first occurrence wins). Entries past the
    /// [`NOMINATION_LIMIT`]th survivor are dropped too.
    #[must_use]
    pub fn sanitize<I, S>(owner: Option<&ParticipantId>, candidates: I) -> Sanitized
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<ParticipantId> = Vec::with_capacity(NOMINATION_LIMIT);
        let mut discarded = Vec::new();

        for candidate in candidates {
            let Ok(id) = ParticipantId::new(candidate) else {
                discarded.push(Discarded::Blank);
                continue;
            };

            if owner == Some(&id) {
                discarded.push(Discarded::SelfNomination(id));
            } else if kept.contains(&id) {
                discarded.push(Discarded::Duplicate(id));
            } else if kept.len() == NOMINATION_LIMIT {
                discarded.push(Discarded::OverLimit(id));
            } else {
                kept.push(id);
            }
        }

        Sanitized {
            nominations: Self(kept),
            discarded,
        }
    }

    /// A copy of this list with `id` removed.
    #[must_use]
    pub fn without(mut self, id: &ParticipantId) -> Self {
        self.0.retain(|nominee| nominee != id);
        self
    }

    /// Whether `id` is nominated.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|nominee| nominee.as_str() == id)
    }

    /// The nominations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ParticipantId] {
        &self.0
    }

    /// Iterate over the nominations in submission order.
    #[must_use = "iterators are lazy and do nothing unless consumed"]
    pub fn iter(&self) -> std::slice::Iter<'_, ParticipantId> {
        self.0.iter()
    }

    /// The number of nominations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no one has been nominated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Nominations {
    type Item = &'a ParticipantId;
    type IntoIter = std::slice::Iter<'a, ParticipantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Nominations> for Vec<ParticipantId> {
    fn from(nominations: Nominations) -> Self {
        nominations.0
    }
}
