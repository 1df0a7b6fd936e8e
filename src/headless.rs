//! Headless viewport for tests, benchmarks and hosts without a browser.
//!
//! [`HeadlessViewport`] implements [`MediaQueryHost`] over a simulated
//! viewport width. Resizing it behaves like a browser does: every list's
//! match state is updated first, then change notifications are dispatched
//! one at a time to the lists whose state flipped.
//!
//! # Example
//!
//! ```rust
//! use floem_media_query::headless::HeadlessViewport;
//! use floem_media_query::host::{MediaQueryHost, MediaQueryList};
//! use floem_media_query::query::{MediaQuery, Threshold};
//!
//! let viewport = HeadlessViewport::new(800.0);
//! let medium = viewport.match_media(&MediaQuery::min_width(&Threshold::Px(600.0)));
//! assert!(medium.matches());
//!
//! viewport.resize(500.0);
//! assert!(!medium.matches());
//! ```

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use smallvec::SmallVec;

use crate::{
    host::{ChangeListener, MediaQueryHost, MediaQueryList},
    query::MediaQuery,
};

/// Root font size used for `em`/`rem` when none is configured.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum MinWidth {
    Px(f64),
    Em(f64),
}

impl MinWidth {
    fn parse(query: &str) -> Option<MinWidth> {
        let value = query
            .trim()
            .strip_prefix('(')?
            .strip_suffix(')')?
            .trim()
            .strip_prefix("min-width")?
            .trim_start()
            .strip_prefix(':')?
            .trim();
        let split = value
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(value.len());
        let (number, unit) = value.split_at(split);
        let number: f64 = number.trim().parse().ok()?;
        match unit {
            "px" => Some(MinWidth::Px(number)),
            "em" | "rem" => Some(MinWidth::Em(number)),
            "" if number == 0.0 => Some(MinWidth::Px(0.0)),
            _ => None,
        }
    }

    fn to_px(self, font_size: f64) -> f64 {
        match self {
            MinWidth::Px(px) => px,
            MinWidth::Em(em) => em * font_size,
        }
    }
}

struct ListState {
    min_width: Option<MinWidth>,
    matches: Cell<bool>,
    listeners: RefCell<SmallVec<[ChangeListener; 2]>>,
}

impl ListState {
    fn evaluate(&self, width: f64, font_size: f64) -> bool {
        self.min_width
            .is_some_and(|min| width >= min.to_px(font_size))
    }

    fn is_registered(&self, listener: &ChangeListener) -> bool {
        self.listeners.borrow().contains(listener)
    }
}

struct ViewportState {
    width: Cell<f64>,
    font_size: Cell<f64>,
    lists: RefCell<Vec<Weak<ListState>>>,
}

impl ViewportState {
    fn live_lists(&self) -> Vec<Rc<ListState>> {
        let mut lists = self.lists.borrow_mut();
        lists.retain(|list| list.strong_count() > 0);
        lists.iter().filter_map(Weak::upgrade).collect()
    }
}

/// A simulated viewport. Clones share the same viewport.
#[derive(Clone)]
pub struct HeadlessViewport {
    state: Rc<ViewportState>,
}

impl HeadlessViewport {
    pub fn new(width: f64) -> Self {
        Self {
            state: Rc::new(ViewportState {
                width: Cell::new(width),
                font_size: Cell::new(DEFAULT_FONT_SIZE),
                lists: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Builder form of [`set_font_size`](Self::set_font_size).
    pub fn with_font_size(self, font_size: f64) -> Self {
        self.set_font_size(font_size);
        self
    }

    /// Change the font size `em` and `rem` lengths resolve against and
    /// notify every list whose match state flipped. Returns the number of
    /// listener calls made.
    pub fn set_font_size(&self, font_size: f64) -> usize {
        self.state.font_size.set(font_size);
        self.reevaluate()
    }

    pub fn width(&self) -> f64 {
        self.state.width.get()
    }

    /// Change the viewport width and notify every list whose match state
    /// flipped. Returns the number of listener calls made.
    pub fn resize(&self, width: f64) -> usize {
        self.state.width.set(width);
        self.reevaluate()
    }

    fn reevaluate(&self) -> usize {
        let width = self.state.width.get();
        let font_size = self.state.font_size.get();

        let changed: Vec<Rc<ListState>> = self
            .state
            .live_lists()
            .into_iter()
            .filter(|list| {
                let matches = list.evaluate(width, font_size);
                list.matches.replace(matches) != matches
            })
            .collect();

        let mut dispatched = 0;
        for list in changed {
            let listeners = list.listeners.borrow().clone();
            for listener in listeners {
                // removed by an earlier listener of this dispatch
                if !list.is_registered(&listener) {
                    continue;
                }
                listener.notify();
                dispatched += 1;
            }
        }
        dispatched
    }

    /// Number of lists still alive.
    pub fn list_count(&self) -> usize {
        self.state.live_lists().len()
    }

    /// Number of listeners registered across all live lists.
    pub fn listener_count(&self) -> usize {
        self.state
            .live_lists()
            .iter()
            .map(|list| list.listeners.borrow().len())
            .sum()
    }
}

impl MediaQueryHost for HeadlessViewport {
    type List = HeadlessMediaQueryList;

    fn match_media(&self, query: &MediaQuery) -> HeadlessMediaQueryList {
        let min_width = MinWidth::parse(query.as_str());
        if min_width.is_none() {
            tracing::warn!(query = %query, "unsupported media query never matches");
        }
        let list = Rc::new(ListState {
            min_width,
            matches: Cell::new(false),
            listeners: RefCell::new(SmallVec::new()),
        });
        list.matches
            .set(list.evaluate(self.state.width.get(), self.state.font_size.get()));
        let mut lists = self.state.lists.borrow_mut();
        lists.retain(|list| list.strong_count() > 0);
        lists.push(Rc::downgrade(&list));
        HeadlessMediaQueryList { state: list }
    }
}

/// A [`MediaQueryList`] created by a [`HeadlessViewport`].
#[derive(Clone)]
pub struct HeadlessMediaQueryList {
    state: Rc<ListState>,
}

impl MediaQueryList for HeadlessMediaQueryList {
    fn matches(&self) -> bool {
        self.state.matches.get()
    }

    fn add_change_listener(&self, listener: &ChangeListener) {
        let mut listeners = self.state.listeners.borrow_mut();
        if !listeners.contains(listener) {
            listeners.push(listener.clone());
        }
    }

    fn remove_change_listener(&self, listener: &ChangeListener) {
        self.state
            .listeners
            .borrow_mut()
            .retain(|registered| *registered != *listener);
    }
}
