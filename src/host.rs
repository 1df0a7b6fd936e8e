//! The host environment the breakpoint state is bridged from.
//!
//! A host turns a [`MediaQuery`] into a live [`MediaQueryList`]: a value that
//! knows whether its query currently matches and notifies registered
//! [`ChangeListener`]s when that changes. In a browser this is
//! `window.matchMedia`; [`HeadlessViewport`](crate::headless::HeadlessViewport)
//! provides an in-process implementation.

use std::{fmt, rc::Rc};

use crate::{id::ListenerId, query::MediaQuery};

/// A change callback with a stable identity.
///
/// Clones share the identity, so a listener can be removed with any clone of
/// the value that was added.
#[derive(Clone)]
pub struct ChangeListener {
    id: ListenerId,
    f: Rc<dyn Fn()>,
}

impl ChangeListener {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self {
            id: ListenerId::next(),
            f: Rc::new(f),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn notify(&self) {
        (self.f)();
    }
}

impl PartialEq for ChangeListener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ChangeListener {}

impl fmt::Debug for ChangeListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ChangeListener");
        s.field("id", &self.id);
        s.finish()
    }
}

/// A live, subscribable match status for one media query.
pub trait MediaQueryList {
    /// Whether the query currently matches.
    fn matches(&self) -> bool;

    /// Register `listener` for change notifications. Adding a listener that is
    /// already registered must not register it twice.
    fn add_change_listener(&self, listener: &ChangeListener);

    /// Remove a previously added listener. Unknown listeners are ignored.
    fn remove_change_listener(&self, listener: &ChangeListener);
}

/// Creates [`MediaQueryList`]s for normalized queries.
pub trait MediaQueryHost {
    type List: MediaQueryList;

    fn match_media(&self, query: &MediaQuery) -> Self::List;
}

impl<H: MediaQueryHost + ?Sized> MediaQueryHost for &H {
    type List = H::List;

    fn match_media(&self, query: &MediaQuery) -> Self::List {
        (**self).match_media(query)
    }
}

impl<H: MediaQueryHost + ?Sized> MediaQueryHost for Rc<H> {
    type List = H::List;

    fn match_media(&self, query: &MediaQuery) -> Self::List {
        (**self).match_media(query)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::ChangeListener;

    #[test]
    fn clones_share_identity() {
        let hits = Rc::new(Cell::new(0));
        let listener = ChangeListener::new({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        let clone = listener.clone();
        assert_eq!(listener, clone);
        assert_ne!(listener, ChangeListener::new(|| {}));

        clone.notify();
        listener.notify();
        assert_eq!(hits.get(), 2);
    }
}
