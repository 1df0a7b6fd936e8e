//! Keeps a [`MatchSnapshot`] in sync with the lists of a [`QueryRegistry`].
//!
//! One shared [`ChangeListener`] is added to every list. Whichever list
//! fires, the listener rereads *all* lists, so a resize that crosses several
//! breakpoints at once can only ever produce a snapshot where every label
//! reflects the current viewport.

use std::{
    cell::Cell,
    mem,
    rc::{Rc, Weak},
};

use crate::{
    host::{ChangeListener, MediaQueryList},
    registry::QueryRegistry,
    snapshot::MatchSnapshot,
};

enum SubscriptionState<L> {
    Unsubscribed,
    Subscribed {
        registry: Rc<QueryRegistry<L>>,
        listener: ChangeListener,
        active: Rc<Cell<bool>>,
    },
}

/// Owns at most one subscription generation at a time.
///
/// Dropping the manager unsubscribes.
pub struct MediaQueryListeners<L: MediaQueryList + 'static> {
    state: SubscriptionState<L>,
}

impl<L: MediaQueryList + 'static> Default for MediaQueryListeners<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: MediaQueryList + 'static> MediaQueryListeners<L> {
    pub fn new() -> Self {
        Self {
            state: SubscriptionState::Unsubscribed,
        }
    }

    /// Subscribe `on_change` to every list of `registry`, tearing down the
    /// previous subscription first.
    ///
    /// `on_change` receives a freshly read snapshot of every list each time
    /// any one of them reports a change.
    pub fn subscribe(
        &mut self,
        registry: Rc<QueryRegistry<L>>,
        on_change: impl Fn(MatchSnapshot) + 'static,
    ) {
        self.unsubscribe();

        let active = Rc::new(Cell::new(true));
        let listener = {
            let registry: Weak<QueryRegistry<L>> = Rc::downgrade(&registry);
            let active = active.clone();
            ChangeListener::new(move || {
                if !active.get() {
                    return;
                }
                if let Some(registry) = registry.upgrade() {
                    on_change(registry.snapshot());
                }
            })
        };

        for list in registry.lists() {
            list.add_change_listener(&listener);
        }
        tracing::debug!(
            listener = ?listener.id(),
            lists = registry.len(),
            "subscribed media query listener"
        );

        self.state = SubscriptionState::Subscribed {
            registry,
            listener,
            active,
        };
    }

    /// Remove the shared listener from every list it was added to. Returns
    /// `false` if there was nothing to remove.
    pub fn unsubscribe(&mut self) -> bool {
        match mem::replace(&mut self.state, SubscriptionState::Unsubscribed) {
            SubscriptionState::Unsubscribed => false,
            SubscriptionState::Subscribed {
                registry,
                listener,
                active,
            } => {
                // a notification already being dispatched must not publish
                active.set(false);
                for list in registry.lists() {
                    list.remove_change_listener(&listener);
                }
                tracing::debug!(
                    listener = ?listener.id(),
                    lists = registry.len(),
                    "unsubscribed media query listener"
                );
                true
            }
        }
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.state, SubscriptionState::Subscribed { .. })
    }

    /// The registry of the active subscription.
    pub fn registry(&self) -> Option<&Rc<QueryRegistry<L>>> {
        match &self.state {
            SubscriptionState::Subscribed { registry, .. } => Some(registry),
            SubscriptionState::Unsubscribed => None,
        }
    }
}

impl<L: MediaQueryList + 'static> Drop for MediaQueryListeners<L> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
