//! # Floem Media Query
//! Reactive viewport breakpoint state. A [`QueryMap`] names a set of
//! minimum-width breakpoints; a [`MediaQueryProvider`] keeps a
//! [`MatchSnapshot`] of which of them the viewport currently satisfies and
//! hands it out through read-only [`MediaQueryReader`]s.
//!
//! ## Example
//! ```rust
//! use floem_media_query::prelude::*;
//!
//! let viewport = HeadlessViewport::new(800.0);
//! let provider = MediaQueryProvider::new(
//!     viewport.clone(),
//!     QueryMap::new()
//!         .with("small", 0)
//!         .with("medium", 600)
//!         .with("large", 1200),
//! );
//!
//! // readers are passed to whoever needs them
//! let reader = provider.reader();
//! let _subscription = reader.subscribe(|snapshot| {
//!     println!("large: {:?}", snapshot.get("large"));
//! });
//!
//! viewport.resize(1280.0);
//! assert_eq!(reader.matches("large"), Some(true));
//! ```
//!
//! ## Hosts
//! The viewport is reached through [`MediaQueryHost`], which turns a
//! normalized `(min-width: …)` query into a live [`MediaQueryList`]. A
//! browser binding wraps `window.matchMedia`; [`HeadlessViewport`] simulates
//! one in-process.
//!
//! ## Updates
//! One change listener is shared by every list. Whenever any list fires it
//! rereads all of them, so a published snapshot is always consistent with a
//! single viewport width, even when a resize crosses several breakpoints.
//! Snapshots are replaced, never edited, and only published when they differ
//! from the current one.
//!
//! The snapshot lives in a `floem_reactive` signal, so reading it through a
//! [`MediaQueryReader`] inside an effect tracks it.
//!
//! ## Lifetime
//! Subscriptions are acquired when the provider is created and released when
//! it is disposed or dropped. Replacing the query map with
//! [`set_queries`](MediaQueryProvider::set_queries) releases the old lists
//! before the new ones are subscribed. Readers of a disposed provider read
//! `None`.
//!
//! ## Logging
//! With [`ProviderConfig::log`] enabled, every published snapshot is also
//! sent to a [`SnapshotLog`], `tracing` by default.

pub mod config;
pub mod headless;
pub mod host;
mod id;
pub mod listeners;
pub mod provider;
pub mod query;
pub mod registry;
pub mod responsive;
pub mod snapshot;
pub mod state;

#[cfg(feature = "serde")]
pub use config::ConfigError;
pub use config::ProviderConfig;
pub use headless::{HeadlessMediaQueryList, HeadlessViewport};
pub use host::{ChangeListener, MediaQueryHost, MediaQueryList};
pub use id::ListenerId;
pub use listeners::MediaQueryListeners;
pub use provider::MediaQueryProvider;
pub use query::{MediaQuery, QueryMap, Threshold};
pub use registry::QueryRegistry;
pub use responsive::GridBreakpoints;
pub use snapshot::MatchSnapshot;
pub use state::{MediaQueryReader, MediaQueryState, SnapshotLog, Subscription, TracingLog};

pub mod prelude {
    pub use crate::{
        HeadlessViewport, MatchSnapshot, MediaQueryHost, MediaQueryList, MediaQueryProvider,
        MediaQueryReader, ProviderConfig, QueryMap, Threshold,
    };
}
