use indexmap::IndexMap;

use crate::{
    host::{MediaQueryHost, MediaQueryList},
    query::QueryMap,
    snapshot::MatchSnapshot,
};

/// The live [`MediaQueryList`]s for one [`QueryMap`], keyed by label.
///
/// Labels, lists and the initial snapshot are derived together when the
/// registry is acquired. A registry belongs to one query map generation and
/// is replaced, not updated, when the query map changes.
pub struct QueryRegistry<L> {
    lists: IndexMap<String, L>,
    initial: MatchSnapshot,
}

impl<L: MediaQueryList> QueryRegistry<L> {
    pub fn acquire<H>(host: &H, queries: &QueryMap) -> Self
    where
        H: MediaQueryHost<List = L> + ?Sized,
    {
        let lists: IndexMap<String, L> = queries
            .queries()
            .map(|(label, query)| (label.to_string(), host.match_media(&query)))
            .collect();
        let initial = read_all(&lists);
        Self { lists, initial }
    }

    /// The snapshot read when the registry was acquired.
    pub fn initial(&self) -> &MatchSnapshot {
        &self.initial
    }

    /// Reads the current match state of every list.
    pub fn snapshot(&self) -> MatchSnapshot {
        read_all(&self.lists)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn lists(&self) -> impl Iterator<Item = &L> {
        self.lists.values()
    }

    pub fn get(&self, label: &str) -> Option<&L> {
        self.lists.get(label)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

fn read_all<L: MediaQueryList>(lists: &IndexMap<String, L>) -> MatchSnapshot {
    lists
        .iter()
        .map(|(label, list)| (label.as_str(), list.matches()))
        .collect()
}
