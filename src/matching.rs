//! Mutual-match resolution.
//!
//! A match exists between two participants when each has nominated the
//! other. Nothing here mutates the roster, and nothing is cached between
//! calls: [`find_matches`] recomputes from the snapshot it is handed.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Nominations, ParticipantId, Roster};

/// The participants `id` has matched with.
///
/// Results follow the order of `id`'s own nominations. Unknown participants
/// and participants with no nominations have no matches.
///
/// `id` is compared verbatim against stored identifiers, which are trimmed.
/// Pass a parsed [`ParticipantId`]; raw input such as `" 101 "` finds
/// nothing.
#[must_use]
pub fn find_matches(roster: &Roster, id: &str) -> Vec<ParticipantId> {
    let Some(record) = roster.get(id) else {
        return Vec::new();
    };

    record
        .nominations()
        .iter()
        .filter(|target| {
            roster
                .get(target.as_str())
                .is_some_and(|target| target.nominates(id))
        })
        .cloned()
        .collect()
}

/// Every matched pair in the roster, each listed once with the smaller
/// identifier first, sorted.
#[must_use]
pub fn mutual_pairs(roster: &Roster) -> Vec<(ParticipantId, ParticipantId)> {
    let mut pairs: Vec<_> = roster
        .iter()
        .flat_map(|record| {
            let id = record.identifier();
            find_matches(roster, id)
                .into_iter()
                .filter(move |other| id < other)
                .map(move |other| (id.clone(), other))
        })
        .collect();
    pairs.sort();
    pairs
}

/// An inverse nomination index: for each participant, who nominated them.
///
/// Building the index is linear in the number of nominations, after which
/// reciprocity checks are set lookups. It can be kept current as nominations
/// change with [`NominationIndex::apply`] instead of being rebuilt.
///
/// The index is an internal acceleration structure. Exposing who nominated a
/// participant would reveal one-sided nominations, which matching exists to
/// keep private.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NominationIndex {
    nominated_by: BTreeMap<ParticipantId, BTreeSet<ParticipantId>>,
}

impl NominationIndex {
    /// Build the index for a roster snapshot.
    #[must_use]
    pub fn from_roster(roster: &Roster) -> Self {
        let mut index = Self::default();
        for record in roster.iter() {
            index.apply(record.identifier(), &Nominations::default(), record.nominations());
        }
        index
    }

    /// Update the index after `owner`'s nominations changed from `previous`
    /// to `current`.
    pub fn apply(&mut self, owner: &ParticipantId, previous: &Nominations, current: &Nominations) {
        for target in previous.iter().filter(|t| !current.contains(t)) {
            if let Some(nominators) = self.nominated_by.get_mut(target.as_str()) {
                nominators.remove(owner.as_str());
                if nominators.is_empty() {
                    self.nominated_by.remove(target.as_str());
                }
            }
        }

        for target in current {
            self.nominated_by
                .entry(target.clone())
                .or_default()
                .insert(owner.clone());
        }
    }

    /// Whether `from` has nominated `to`.
    #[must_use]
    fn has_nominated(&self, from: &str, to: &str) -> bool {
        self.nominated_by
            .get(to)
            .is_some_and(|nominators| nominators.contains(from))
    }

    /// The participants `id` has matched with, in the order of `id`'s own
    /// nominations.
    ///
    /// Agrees with [`find_matches`] as long as the index is current for
    /// `roster`.
    #[must_use]
    pub fn matches_for(&self, roster: &Roster, id: &str) -> Vec<ParticipantId> {
        let Some(record) = roster.get(id) else {
            return Vec::new();
        };

        record
            .nominations()
            .iter()
            .filter(|target| self.has_nominated(target, id))
            .cloned()
            .collect()
    }

    /// Every matched pair, each listed once with the smaller identifier
    /// first, sorted.
    #[must_use]
    pub fn mutual_pairs(&self) -> Vec<(ParticipantId, ParticipantId)> {
        let mut pairs = Vec::new();
        for (target, nominators) in &self.nominated_by {
            for nominator in nominators {
                if nominator < target && self.has_nominated(target, nominator) {
                    pairs.push((nominator.clone(), target.clone()));
                }
            }
        }
        pairs.sort();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{ParticipantRecord, seed::demo_participants};

    fn id(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    fn roster(entries: &[(&str, &[&str])]) -> Roster {
        entries
            .iter()
            .map(|(owner, nominees)| {
                let owner = id(owner);
                let nominations =
                    Nominations::sanitize(Some(&owner), nominees.iter().copied()).nominations;
                ParticipantRecord::with_nominations(owner, nominations)
            })
            .collect()
    }

    fn names(ids: &[ParticipantId]) -> Vec<&str> {
        ids.iter().map(ParticipantId::as_str).collect()
    }

    #[test]
    fn reciprocal_nominations_match_both_ways() {
        let roster = roster(&[("101", &["102", "103", "104"]), ("102", &["101", "105", "106"])]);

        assert_eq!(names(&find_matches(&roster, "101")), ["102"]);
        assert_eq!(names(&find_matches(&roster, "102")), ["101"]);
    }

    #[test]
    fn one_sided_nomination_does_not_match() {
        let roster = roster(&[("101", &["102"]), ("102", &["103"])]);

        assert!(find_matches(&roster, "101").is_empty());
        assert!(find_matches(&roster, "102").is_empty());
    }

    #[test_case(&[], "101"; "unknown participant")]
    #[test_case(&[("101", &[]), ("102", &["101"])], "101"; "no nominations")]
    #[test_case(&[("101", &["102"])], "101"; "nominee never registered")]
    #[test_case(&[("101", &["102"]), ("102", &["101"])], " 101 "; "unparsed identifier")]
    fn no_matches(entries: &[(&str, &[&str])], who: &str) {
        assert!(find_matches(&roster(entries), who).is_empty());
    }

    #[test]
    fn matches_follow_own_nomination_order() {
        let roster = roster(&[
            ("101", &["104", "102", "103"]),
            ("102", &["101"]),
            ("103", &["101"]),
            ("104", &["101"]),
        ]);

        assert_eq!(names(&find_matches(&roster, "101")), ["104", "102", "103"]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let roster = roster(&[("ab", &["CD"]), ("cd", &["ab"])]);
        assert!(find_matches(&roster, "ab").is_empty());
    }

    #[test]
    fn lists_each_pair_once() {
        let roster = roster(&[
            ("101", &["102", "103"]),
            ("102", &["101"]),
            ("103", &["101", "104"]),
            ("104", &["103"]),
            ("105", &["101"]),
        ]);

        let pairs = mutual_pairs(&roster);
        let pairs: Vec<_> = pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(pairs, [("101", "102"), ("101", "103"), ("103", "104")]);
    }

    #[test]
    fn index_agrees_with_direct_resolution() {
        let roster = roster(&[
            ("101", &["102", "103", "104"]),
            ("102", &["101", "105", "106"]),
            ("103", &["101", "102"]),
            ("104", &["105"]),
            ("105", &["104", "102"]),
        ]);
        let index = NominationIndex::from_roster(&roster);

        for record in roster.iter() {
            let who = record.identifier().as_str();
            assert_eq!(index.matches_for(&roster, who), find_matches(&roster, who));
        }
        assert_eq!(index.mutual_pairs(), mutual_pairs(&roster));
    }

    #[test]
    fn incremental_updates_match_a_rebuild() {
        let mut roster: Roster = demo_participants().into_iter().collect();
        let mut index = NominationIndex::from_roster(&roster);

        let replaced = roster.replace_nominations(&id("103"), ["101", "102", "108"]);
        index.apply(&id("103"), &replaced.previous, replaced.record.nominations());
        let replaced = roster.replace_nominations(&id("102"), ["103", "101"]);
        index.apply(&id("102"), &replaced.previous, replaced.record.nominations());

        assert_eq!(index, NominationIndex::from_roster(&roster));
        assert_eq!(names(&index.matches_for(&roster, "102")), ["103", "101"]);
    }

    #[test]
    fn demo_roster_has_single_match() {
        let roster: Roster = demo_participants().into_iter().collect();

        assert_eq!(names(&find_matches(&roster, "101")), ["102"]);
        assert_eq!(names(&find_matches(&roster, "102")), ["101"]);
        assert!(find_matches(&roster, "103").is_empty());
    }
}
