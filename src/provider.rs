//! Ties a [`QueryMap`] to a host for as long as the provider lives.
//!
//! Construction acquires the host's media query lists and subscribes to
//! them; [`dispose`](MediaQueryProvider::dispose) (or dropping the provider)
//! releases them. Consumers receive a [`MediaQueryReader`] from
//! [`reader`](MediaQueryProvider::reader).
//!
//! ```rust
//! use floem_media_query::headless::HeadlessViewport;
//! use floem_media_query::provider::MediaQueryProvider;
//! use floem_media_query::query::QueryMap;
//!
//! let viewport = HeadlessViewport::new(800.0);
//! let queries = QueryMap::new()
//!     .with("small", 0)
//!     .with("medium", 600)
//!     .with("large", 1200);
//!
//! let provider = MediaQueryProvider::new(viewport.clone(), queries);
//! let reader = provider.reader();
//! assert_eq!(reader.matches("large"), Some(false));
//!
//! viewport.resize(1280.0);
//! assert_eq!(reader.matches("large"), Some(true));
//!
//! provider.dispose();
//! assert_eq!(reader.matches("large"), None);
//! ```

use std::{fmt, rc::Rc};

use crate::{
    config::ProviderConfig,
    host::MediaQueryHost,
    listeners::MediaQueryListeners,
    query::QueryMap,
    registry::QueryRegistry,
    snapshot::MatchSnapshot,
    state::{MediaQueryReader, MediaQueryState, SnapshotLog, TracingLog},
};

/// Publishes the match state of a [`QueryMap`] against a [`MediaQueryHost`].
pub struct MediaQueryProvider<H>
where
    H: MediaQueryHost,
    H::List: 'static,
{
    host: H,
    queries: QueryMap,
    version: u64,
    registry: Rc<QueryRegistry<H::List>>,
    listeners: MediaQueryListeners<H::List>,
    state: MediaQueryState,
}

impl<H> MediaQueryProvider<H>
where
    H: MediaQueryHost,
    H::List: 'static,
{
    pub fn new(host: H, queries: QueryMap) -> Self {
        Self::with_config(host, queries, ProviderConfig::default())
    }

    pub fn with_config(host: H, queries: QueryMap, config: ProviderConfig) -> Self {
        Self::with_log_sink(host, queries, config, TracingLog)
    }

    /// Like [`with_config`](Self::with_config), with snapshots logged to
    /// `sink` instead of `tracing`.
    pub fn with_log_sink(
        host: H,
        queries: QueryMap,
        config: ProviderConfig,
        sink: impl SnapshotLog + 'static,
    ) -> Self {
        let registry = Rc::new(QueryRegistry::acquire(&host, &queries));
        let state = MediaQueryState::with_log(registry.initial().clone(), config.log, sink);
        let mut listeners = MediaQueryListeners::new();
        listeners.subscribe(registry.clone(), state.publisher());

        tracing::debug!(labels = queries.len(), "media query provider created");
        Self {
            host,
            queries,
            version: 0,
            registry,
            listeners,
            state,
        }
    }

    /// Replace the query map. A map equal to the current one is ignored and
    /// `false` is returned.
    ///
    /// Otherwise the old lists are unsubscribed, new lists are acquired, their
    /// initial snapshot is published and the new lists are subscribed.
    pub fn set_queries(&mut self, queries: QueryMap) -> bool {
        if queries == self.queries {
            return false;
        }

        self.listeners.unsubscribe();
        self.registry = Rc::new(QueryRegistry::acquire(&self.host, &queries));
        self.queries = queries;
        self.version += 1;

        self.state.publish(self.registry.initial().clone());
        self.listeners
            .subscribe(self.registry.clone(), self.state.publisher());

        tracing::debug!(
            version = self.version,
            labels = self.queries.len(),
            "media query map replaced"
        );
        true
    }

    pub fn reader(&self) -> MediaQueryReader {
        self.state.reader()
    }

    pub fn snapshot(&self) -> Rc<MatchSnapshot> {
        self.state.snapshot()
    }

    pub fn queries(&self) -> &QueryMap {
        &self.queries
    }

    /// Incremented every time [`set_queries`](Self::set_queries) replaces the
    /// query map.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_subscribed(&self) -> bool {
        self.listeners.is_subscribed()
    }

    pub fn set_log(&self, log: bool) {
        self.state.set_log(log);
    }

    /// Release every subscription. Readers read `None` afterwards.
    pub fn dispose(self) {}
}

impl<H> Drop for MediaQueryProvider<H>
where
    H: MediaQueryHost,
    H::List: 'static,
{
    fn drop(&mut self) {
        if self.listeners.unsubscribe() {
            tracing::debug!(version = self.version, "media query provider disposed");
        }
    }
}

impl<H> fmt::Debug for MediaQueryProvider<H>
where
    H: MediaQueryHost,
    H::List: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MediaQueryProvider");
        s.field("queries", &self.queries);
        s.field("version", &self.version);
        s.field("state", &self.state);
        s.finish()
    }
}
