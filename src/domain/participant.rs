use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::domain::Nominations;

/// A participant identifier.
///
/// Identifiers are self-asserted, case-sensitive strings (for example a roll
/// number such as `101`). Surrounding whitespace is trimmed on construction
/// and a blank identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(NonEmptyString);

impl ParticipantId {
    /// Creates a new identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdentifierError`] if the string is empty or consists
    /// only of whitespace.
    pub fn new(s: impl AsRef<str>) -> Result<Self, EmptyIdentifierError> {
        let trimmed = s.as_ref().trim();
        NonEmptyString::new(trimmed.to_string())
            .map(Self)
            .map_err(|_| EmptyIdentifierError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Error returned when an identifier is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("participant identifier must not be blank")]
pub struct EmptyIdentifierError;

impl TryFrom<String> for ParticipantId {
    type Error = EmptyIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ParticipantId {
    type Error = EmptyIdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for ParticipantId {
    type Err = EmptyIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0.as_str().to_owned()
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for ParticipantId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A participant and the peers they have nominated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRecord {
    identifier: ParticipantId,
    nominations: Nominations,
}

impl ParticipantRecord {
    /// A freshly registered participant with no nominations.
    #[must_use]
    pub fn new(identifier: ParticipantId) -> Self {
        Self::with_nominations(identifier, Nominations::default())
    }

    /// A participant with the given nominations.
    ///
    /// The nominations are checked against `identifier` and any
    /// self-nomination is dropped, so the record invariant holds regardless
    /// of how `nominations` was built.
    #[must_use]
    pub fn with_nominations(identifier: ParticipantId, nominations: Nominations) -> Self {
        let nominations = nominations.without(&identifier);
        Self {
            identifier,
            nominations,
        }
    }

    /// The participant's identifier.
    #[must_use]
    pub const fn identifier(&self) -> &ParticipantId {
        &self.identifier
    }

    /// The participant's current nominations, in submission order.
    #[must_use]
    pub const fn nominations(&self) -> &Nominations {
        &self.nominations
    }

    /// Whether this participant has nominated `other`.
    #[must_use]
    pub fn nominates(&self, other: &str) -> bool {
        self.nominations.contains(other)
    }

    pub(crate) fn set_nominations(&mut self, nominations: Nominations) {
        self.nominations = nominations.without(&self.identifier);
    }
}
