//! Breakpoint thresholds and the [`QueryMap`] that names them.
//!
//! A [`QueryMap`] is an ordered set of labelled thresholds. Each threshold is
//! normalized into a `(min-width: …)` [`MediaQuery`] before it is handed to a
//! [`MediaQueryHost`](crate::host::MediaQueryHost).
//!
//! ```rust
//! use floem_media_query::query::QueryMap;
//!
//! let queries = QueryMap::new()
//!     .with("small", 0)
//!     .with("medium", 600)
//!     .with("wide", "75em");
//!
//! let normalized: Vec<_> = queries.queries().map(|(_, q)| q.to_string()).collect();
//! assert_eq!(
//!     normalized,
//!     ["(min-width: 0px)", "(min-width: 600px)", "(min-width: 75em)"]
//! );
//! ```

use std::fmt;

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The width a breakpoint starts at.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(untagged, expecting = "a pixel count or a length string")
)]
pub enum Threshold {
    /// A pixel count, formatted as `{value}px`.
    Px(f64),
    /// An already formatted length such as `40em`, used verbatim.
    Length(String),
}

// bitwise on pixels so that a map holding NaN still equals itself
impl PartialEq for Threshold {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Threshold::Px(a), Threshold::Px(b)) => a.to_bits() == b.to_bits(),
            (Threshold::Length(a), Threshold::Length(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Px(px) => write!(f, "{px}px"),
            Threshold::Length(length) => f.write_str(length),
        }
    }
}

macro_rules! impl_px_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Threshold {
                fn from(value: $ty) -> Self {
                    Threshold::Px(value as f64)
                }
            }
        )*
    };
}

impl_px_from!(u8, u16, u32, u64, usize, i32, i64, f64);

impl From<f32> for Threshold {
    /// Goes through the `f32`'s shortest decimal form, so `0.1f32` stays
    /// `0.1px` instead of picking up widening noise.
    fn from(value: f32) -> Self {
        Threshold::Px(value.to_string().parse().unwrap_or(f64::from(value)))
    }
}

impl From<&str> for Threshold {
    fn from(value: &str) -> Self {
        Threshold::Length(value.to_string())
    }
}

impl From<String> for Threshold {
    fn from(value: String) -> Self {
        Threshold::Length(value)
    }
}

/// A normalized minimum-width media query, e.g. `(min-width: 600px)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaQuery(String);

impl MediaQuery {
    pub fn min_width(threshold: &Threshold) -> Self {
        Self(format!("(min-width: {threshold})"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MediaQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An ordered mapping from breakpoint label to [`Threshold`].
///
/// Two maps are equal when they hold the same labels, in the same order,
/// with the same thresholds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct QueryMap {
    entries: IndexMap<String, Threshold>,
}

// IndexMap equality ignores order, label order is part of a query map
impl PartialEq for QueryMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, label: impl Into<String>, threshold: impl Into<Threshold>) -> Self {
        self.insert(label, threshold);
        self
    }

    /// Insert a breakpoint. Re-inserting a label replaces its threshold but
    /// keeps its position.
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        threshold: impl Into<Threshold>,
    ) -> Option<Threshold> {
        self.entries.insert(label.into(), threshold.into())
    }

    pub fn remove(&mut self, label: &str) -> Option<Threshold> {
        self.entries.shift_remove(label)
    }

    pub fn get(&self, label: &str) -> Option<&Threshold> {
        self.entries.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Threshold)> {
        self.entries.iter().map(|(label, t)| (label.as_str(), t))
    }

    /// Every label paired with its normalized query.
    pub fn queries(&self) -> impl Iterator<Item = (&str, MediaQuery)> {
        self.iter()
            .map(|(label, threshold)| (label, MediaQuery::min_width(threshold)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, T> FromIterator<(L, T)> for QueryMap
where
    L: Into<String>,
    T: Into<Threshold>,
{
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut map = QueryMap::new();
        map.extend(iter);
        map
    }
}

impl<L, T> Extend<(L, T)> for QueryMap
where
    L: Into<String>,
    T: Into<Threshold>,
{
    fn extend<I: IntoIterator<Item = (L, T)>>(&mut self, iter: I) {
        for (label, threshold) in iter {
            self.insert(label, threshold);
        }
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, Threshold);
    type IntoIter = indexmap::map::IntoIter<String, Threshold>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{MediaQuery, QueryMap, Threshold};

    #[test]
    fn pixels_get_a_px_suffix() {
        assert_eq!(MediaQuery::min_width(&800.into()).as_str(), "(min-width: 800px)");
        assert_eq!(MediaQuery::min_width(&0.into()).as_str(), "(min-width: 0px)");
        assert_eq!(
            MediaQuery::min_width(&12.5.into()).as_str(),
            "(min-width: 12.5px)"
        );
    }

    #[test]
    fn lengths_are_used_verbatim() {
        assert_eq!(
            MediaQuery::min_width(&"40em".into()).as_str(),
            "(min-width: 40em)"
        );
        // not validated
        assert_eq!(
            MediaQuery::min_width(&"wide".into()).as_str(),
            "(min-width: wide)"
        );
    }

    #[test]
    fn labels_keep_insertion_order() {
        let map = QueryMap::new()
            .with("large", 1200)
            .with("small", 0)
            .with("medium", 600);
        let labels: Vec<_> = map.labels().collect();
        assert_eq!(labels, ["large", "small", "medium"]);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut map = QueryMap::new().with("a", 1).with("b", 2);
        let old = map.insert("a", "3em");
        assert_eq!(old, Some(Threshold::Px(1.0)));
        let entries: Vec<_> = map.iter().map(|(l, t)| (l.to_string(), t.clone())).collect();
        assert_eq!(
            entries,
            [
                ("a".to_string(), Threshold::Length("3em".into())),
                ("b".to_string(), Threshold::Px(2.0)),
            ]
        );
    }

    #[test]
    fn equality_is_structural() {
        let a = QueryMap::from_iter([("small", 0), ("medium", 600)]);
        let b = QueryMap::new().with("small", 0).with("medium", 600);
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with("medium", 601));
        assert_ne!(a, QueryMap::from_iter([("medium", 600), ("small", 0)]));
    }

    #[test]
    fn f32_pixels_keep_their_decimal_form() {
        assert_eq!(
            MediaQuery::min_width(&0.1f32.into()).as_str(),
            "(min-width: 0.1px)"
        );
        assert_eq!(
            MediaQuery::min_width(&600f32.into()).as_str(),
            "(min-width: 600px)"
        );
    }

    #[test]
    fn nan_threshold_equals_itself() {
        let map = QueryMap::new().with("odd", f64::NAN).with("small", 0);
        assert_eq!(map, map.clone());
        assert_ne!(map, QueryMap::new().with("odd", -f64::NAN).with("small", 0));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut map = QueryMap::from_iter([("a", 1), ("b", 2), ("c", 3)]);
        map.remove("b");
        assert_eq!(map.labels().collect::<Vec<_>>(), ["a", "c"]);
        assert!(!map.contains("b"));
    }
}
