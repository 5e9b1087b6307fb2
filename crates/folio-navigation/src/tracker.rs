//! Scroll-position tracking of the active TOC entry.

use std::cell::RefCell;
use std::rc::Rc;

use crate::handle::ElementHandle;
use crate::registry::TocRegistry;

/// Default fraction of the viewport height used as the activation line.
pub const DEFAULT_ACTIVATION_RATIO: f64 = 0.5;

/// Visible area at the time of a scroll notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self { height }
    }
}

/// Tracker configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerOptions {
    /// A heading whose top edge is at or above `height * activation_ratio`
    /// is considered reached.
    pub activation_ratio: f64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            activation_ratio: DEFAULT_ACTIVATION_RATIO,
        }
    }
}

/// Outcome of [`ScrollTracker::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerUpdate {
    /// The active entry is the same as before.
    Unchanged,
    /// The active entry moved.
    Changed {
        from: Option<String>,
        to: Option<String>,
    },
}

/// Identifier of a scroll listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Host source of scroll and resize notifications.
///
/// Notifications must not be delivered re-entrantly: a listener is never
/// invoked while another call to the same listener is still running. A
/// nested notification raised from inside a listener (for example by a
/// host whose `set_active` scrolls synchronously) is dropped.
pub trait ScrollSource {
    /// Register `listener`. It is called once per notification until
    /// unsubscribed.
    fn subscribe(&self, listener: Box<dyn FnMut(&Viewport)>) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}

/// Marks the nav item of the last heading scrolled past the activation line.
///
/// Each [`update`](Self::update) is a two-phase pass: the registry produces
/// complete entries sorted by current position, then a linear scan picks the
/// last entry whose heading top is at or above the activation line.
pub struct ScrollTracker {
    registry: TocRegistry,
    options: TrackerOptions,
    active_id: Option<String>,
    marked: Option<Rc<dyn ElementHandle>>,
}

impl ScrollTracker {
    #[must_use]
    pub fn new(registry: TocRegistry, options: TrackerOptions) -> Self {
        Self {
            registry,
            options,
            active_id: None,
            marked: None,
        }
    }

    /// Id of the active entry, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// Recompute the active entry for `viewport`.
    pub fn update(&mut self, viewport: &Viewport) -> TrackerUpdate {
        let references = self.registry.collect_ordered_references();
        let midpoint = viewport.height * self.options.activation_ratio;

        let mut candidate = None;
        for reference in references {
            let Some(rect) = reference.heading.rect() else {
                continue;
            };
            if rect.top <= midpoint {
                candidate = Some(reference);
            } else if rect.bottom > 0.0 {
                break;
            }
        }

        let candidate_id = candidate.as_ref().map(|r| r.id.as_str());
        if candidate_id == self.active_id.as_deref() {
            return TrackerUpdate::Unchanged;
        }

        if let Some(previous) = self.marked.take()
            && previous.is_alive()
        {
            previous.set_active(false);
        }

        let to = candidate.map(|reference| {
            if reference.nav.is_alive() {
                reference.nav.set_active(true);
                self.marked = Some(reference.nav);
            }
            reference.id
        });
        let from = std::mem::replace(&mut self.active_id, to.clone());

        tracing::debug!(?from, ?to, midpoint, "Active TOC entry changed");
        TrackerUpdate::Changed { from, to }
    }

    /// Subscribe a new tracker to `source`.
    ///
    /// The tracker runs on every notification until the returned
    /// subscription is detached or dropped.
    pub fn attach(
        registry: TocRegistry,
        source: Rc<dyn ScrollSource>,
        options: TrackerOptions,
    ) -> TrackerSubscription {
        let state = Rc::new(RefCell::new(Some(Self::new(registry, options))));

        let listener_state = Rc::clone(&state);
        let id = source.subscribe(Box::new(move |viewport: &Viewport| {
            let Ok(mut state) = listener_state.try_borrow_mut() else {
                tracing::debug!("Skipping re-entrant scroll notification");
                return;
            };
            // `None` once detached: late notifications are ignored.
            if let Some(tracker) = state.as_mut() {
                tracker.update(viewport);
            }
        }));
        tracing::debug!(listener = id.get(), "Attached scroll tracker");

        TrackerSubscription {
            source: Some(source),
            id,
            state,
        }
    }
}

impl std::fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("options", &self.options)
            .field("active_id", &self.active_id)
            .finish_non_exhaustive()
    }
}

/// Live subscription of a [`ScrollTracker`] to a [`ScrollSource`].
///
/// Dropping the value detaches it.
#[must_use = "dropping a TrackerSubscription detaches the tracker"]
pub struct TrackerSubscription {
    source: Option<Rc<dyn ScrollSource>>,
    id: ListenerId,
    state: Rc<RefCell<Option<ScrollTracker>>>,
}

impl TrackerSubscription {
    /// Id of the active entry, or `None` if nothing is active or detached.
    ///
    /// Also `None` while an update is running.
    #[must_use]
    pub fn active_id(&self) -> Option<String> {
        self.state
            .try_borrow()
            .ok()?
            .as_ref()
            .and_then(|tracker| tracker.active_id().map(ToOwned::to_owned))
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    /// Run the tracker immediately, as after the initial layout.
    ///
    /// Returns `None` once detached, or when called while an update is
    /// already running (from a handle's `set_active`, say).
    pub fn refresh(&self, viewport: &Viewport) -> Option<TrackerUpdate> {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            tracing::debug!(listener = self.id.get(), "Skipping re-entrant refresh");
            return None;
        };
        state.as_mut().map(|tracker| tracker.update(viewport))
    }

    /// Unsubscribe from the source and tear down the tracker.
    ///
    /// The nav item the tracker marked is cleared, unless this is called from
    /// inside the tracker's own scroll notification. Only the first call has
    /// an effect.
    pub fn detach(&mut self) {
        let Some(source) = self.source.take() else {
            return;
        };
        source.unsubscribe(self.id);

        let Ok(mut state) = self.state.try_borrow_mut() else {
            // Detached from inside the tracker's own listener. The source no
            // longer calls it, so the running update is the last one.
            tracing::debug!(listener = self.id.get(), "Detached during scroll notification");
            return;
        };
        if let Some(marked) = state.take().and_then(|tracker| tracker.marked)
            && marked.is_alive()
        {
            marked.set_active(false);
        }
        tracing::debug!(listener = self.id.get(), "Detached scroll tracker");
    }
}

impl Drop for TrackerSubscription {
    fn drop(&mut self) {
        self.detach();
    }
}
