//! Shared breakpoint state and the read-only handles consumers receive.
//!
//! [`MediaQueryState`] owns a [`Scope`] holding an [`RwSignal`] with the
//! current [`MatchSnapshot`]. Consumers get a [`MediaQueryReader`], passed to
//! them explicitly, which can read the latest snapshot or subscribe to updates
//! but never write. Reads inside a Floem effect track the snapshot like any
//! other signal.
//!
//! Dropping the state disposes its scope; every reader then reads `None`:
//!
//! ```rust
//! use floem_media_query::snapshot::MatchSnapshot;
//! use floem_media_query::state::MediaQueryState;
//!
//! let state = MediaQueryState::new(MatchSnapshot::from_iter([("medium", true)]));
//! let reader = state.reader();
//! assert_eq!(reader.matches("medium"), Some(true));
//!
//! drop(state);
//! assert_eq!(reader.matches("medium"), None);
//! ```

use std::{cell::Cell, fmt, rc::Rc};

use floem_reactive::{
    ReadSignal, RwSignal, Scope, SignalGet, SignalUpdate, SignalWith, create_effect,
    create_updater, with_scope,
};

use crate::snapshot::MatchSnapshot;

/// Receives every published snapshot while logging is enabled.
pub trait SnapshotLog {
    fn log(&self, snapshot: &MatchSnapshot);
}

/// Emits each snapshot as a `tracing` event on the `floem_media_query`
/// target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl SnapshotLog for TracingLog {
    fn log(&self, snapshot: &MatchSnapshot) {
        tracing::info!(target: "floem_media_query", state = ?snapshot, "media query state");
    }
}

impl<F: Fn(&MatchSnapshot)> SnapshotLog for F {
    fn log(&self, snapshot: &MatchSnapshot) {
        self(snapshot)
    }
}

/// The owner of the current [`MatchSnapshot`].
pub struct MediaQueryState {
    scope: Scope,
    snapshot: RwSignal<Rc<MatchSnapshot>>,
    log: RwSignal<bool>,
}

impl MediaQueryState {
    /// A state with logging disabled and [`TracingLog`] as sink.
    pub fn new(initial: MatchSnapshot) -> Self {
        Self::with_log(initial, false, TracingLog)
    }

    /// A state that emits `initial`, and every later snapshot, to `sink`
    /// while `log` is enabled.
    pub fn with_log(initial: MatchSnapshot, log: bool, sink: impl SnapshotLog + 'static) -> Self {
        let scope = Scope::new();
        let snapshot = scope.create_rw_signal(Rc::new(initial));
        let log = scope.create_rw_signal(log);

        // toggling the flag must not re-emit the current snapshot
        with_scope(scope, || {
            create_effect(move |_| {
                let snapshot = snapshot.get();
                if log.get_untracked() {
                    sink.log(&snapshot);
                }
            })
        });

        Self {
            scope,
            snapshot,
            log,
        }
    }

    /// Replace the current snapshot and notify every subscriber.
    pub fn publish(&self, snapshot: MatchSnapshot) {
        self.snapshot.set(Rc::new(snapshot));
    }

    pub fn snapshot(&self) -> Rc<MatchSnapshot> {
        self.snapshot.get_untracked()
    }

    pub fn reader(&self) -> MediaQueryReader {
        MediaQueryReader {
            source: Some(Source {
                scope: self.scope,
                snapshot: self.snapshot.read_only(),
            }),
        }
    }

    pub fn set_log(&self, log: bool) {
        self.log.set(log);
    }

    /// A callback that publishes snapshots differing from the current one.
    /// It does nothing once the state is dropped.
    pub(crate) fn publisher(&self) -> impl Fn(MatchSnapshot) + 'static {
        let current = self.snapshot;
        move |snapshot: MatchSnapshot| {
            let changed = current.try_with_untracked(|current| {
                current.is_some_and(|current| **current != snapshot)
            });
            if changed {
                current.set(Rc::new(snapshot));
            }
        }
    }
}

impl Drop for MediaQueryState {
    fn drop(&mut self) {
        self.scope.dispose();
    }
}

impl fmt::Debug for MediaQueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MediaQueryState");
        s.field("scope", &self.scope);
        s.field("snapshot", &self.snapshot.try_get_untracked());
        s.field("log", &self.log.try_get_untracked());
        s.finish()
    }
}

#[derive(Clone, Copy)]
struct Source {
    scope: Scope,
    snapshot: ReadSignal<Rc<MatchSnapshot>>,
}

/// A read-only handle to a [`MediaQueryState`].
///
/// Readers are `Copy`. A default reader is not attached to any state and
/// reads `None`, same as a reader whose state has been dropped.
#[derive(Clone, Copy, Default)]
pub struct MediaQueryReader {
    source: Option<Source>,
}

impl MediaQueryReader {
    /// The latest snapshot, or `None` if the state is gone.
    pub fn try_get(&self) -> Option<Rc<MatchSnapshot>> {
        self.source?.snapshot.try_get()
    }

    /// Applies a closure to the latest snapshot.
    pub fn try_with<O>(&self, f: impl FnOnce(&MatchSnapshot) -> O) -> Option<O> {
        let source = self.source?;
        source
            .snapshot
            .try_with(|snapshot| snapshot.map(|snapshot| f(&**snapshot)))
    }

    /// The current match state of `label`. `None` for unknown labels and
    /// once the state is gone.
    pub fn matches(&self, label: &str) -> Option<bool> {
        self.try_with(|snapshot| snapshot.get(label)).flatten()
    }

    pub fn is_disposed(&self) -> bool {
        match self.source {
            Some(source) => source.snapshot.try_with_untracked(|s| s.is_none()),
            None => true,
        }
    }

    /// Call `f` with every snapshot published from now on, until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, f: impl Fn(&MatchSnapshot) + 'static) -> Subscription {
        let active = Rc::new(Cell::new(false));
        let Some(source) = self.source.filter(|_| !self.is_disposed()) else {
            return Subscription {
                scope: Scope::new(),
                active,
            };
        };

        let scope = source.scope.create_child();
        let snapshot = source.snapshot;
        active.set(true);
        {
            let active = active.clone();
            with_scope(scope, move || {
                create_updater(
                    move || {
                        // a subscription dropped mid-notification stops here
                        if !active.get() {
                            return None;
                        }
                        scope.track();
                        snapshot.try_get()
                    },
                    move |snapshot: Option<Rc<MatchSnapshot>>| {
                        if let Some(snapshot) = snapshot {
                            f(&*snapshot);
                        }
                    },
                )
            });
        }

        Subscription { scope, active }
    }
}

impl fmt::Debug for MediaQueryReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MediaQueryReader");
        s.field(
            "snapshot",
            &self.source.and_then(|source| source.snapshot.try_get_untracked()),
        );
        s.finish()
    }
}

/// Keeps a [`MediaQueryReader::subscribe`] callback registered.
#[must_use = "the callback is unsubscribed when the Subscription is dropped"]
pub struct Subscription {
    scope: Scope,
    active: Rc<Cell<bool>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.set(false);
        self.scope.dispose();
    }
}
