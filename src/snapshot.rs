use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether each breakpoint currently matches, keyed by label in query map
/// order.
///
/// A snapshot is never mutated after it is published; updates replace it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct MatchSnapshot {
    matches: IndexMap<String, bool>,
}

impl MatchSnapshot {
    /// The match state of `label`, or `None` for an unknown label.
    pub fn get(&self, label: &str) -> Option<bool> {
        self.matches.get(label).copied()
    }

    /// `true` only if `label` is known and matches.
    pub fn is_match(&self, label: &str) -> bool {
        self.get(label).unwrap_or(false)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.matches.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.matches.iter().map(|(label, m)| (label.as_str(), *m))
    }

    /// The last matching label in query map order. With ascending thresholds
    /// this is the widest active breakpoint.
    pub fn last_match(&self) -> Option<&str> {
        self.iter()
            .filter(|(_, matches)| *matches)
            .map(|(label, _)| label)
            .last()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, bool)> for MatchSnapshot {
    fn from_iter<I: IntoIterator<Item = (L, bool)>>(iter: I) -> Self {
        Self {
            matches: iter
                .into_iter()
                .map(|(label, matches)| (label.into(), matches))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MatchSnapshot;

    #[test]
    fn unknown_labels_are_absent() {
        let snapshot = MatchSnapshot::from_iter([("small", true), ("large", false)]);
        assert_eq!(snapshot.get("small"), Some(true));
        assert_eq!(snapshot.get("large"), Some(false));
        assert_eq!(snapshot.get("huge"), None);
        assert!(!snapshot.is_match("huge"));
    }

    #[test]
    fn last_match_follows_order() {
        let snapshot =
            MatchSnapshot::from_iter([("small", true), ("medium", true), ("large", false)]);
        assert_eq!(snapshot.last_match(), Some("medium"));
        assert_eq!(MatchSnapshot::default().last_match(), None);
    }
}
