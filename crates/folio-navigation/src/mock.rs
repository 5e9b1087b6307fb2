//! In-memory host for testing.
//!
//! Provides [`MockHost`], [`MockHandle`] and [`MockScrollSource`] for
//! exercising mounting and tracking without a real layout engine.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use folio_renderer::{MountRole, ViewElement};

use crate::handle::{ElementHandle, Rect};
use crate::mount::MountHost;
use crate::tracker::{ListenerId, ScrollSource, Viewport};

/// Element handle with settable position and liveness.
#[derive(Debug)]
pub struct MockHandle {
    alive: Cell<bool>,
    rect: Cell<Option<Rect>>,
    active: Cell<bool>,
    toggles: Cell<usize>,
}

impl Default for MockHandle {
    fn default() -> Self {
        Self {
            alive: Cell::new(true),
            rect: Cell::new(None),
            active: Cell::new(false),
            toggles: Cell::new(0),
        }
    }
}

impl MockHandle {
    /// Create a live handle without a position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a live handle at `top..bottom`.
    #[must_use]
    pub fn at(top: f64, bottom: f64) -> Self {
        let handle = Self::new();
        handle.set_rect(top, bottom);
        handle
    }

    pub fn set_rect(&self, top: f64, bottom: f64) {
        self.rect.set(Some(Rect::new(top, bottom)));
    }

    /// Shift the handle by `delta`, as scrolling would.
    pub fn scroll_by(&self, delta: f64) {
        if let Some(rect) = self.rect.get() {
            self.rect.set(Some(Rect::new(rect.top - delta, rect.bottom - delta)));
        }
    }

    /// Mark the element as removed from the host.
    pub fn kill(&self) {
        self.alive.set(false);
        self.rect.set(None);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Number of `set_active` calls received.
    #[must_use]
    pub fn toggles(&self) -> usize {
        self.toggles.get()
    }
}

impl ElementHandle for MockHandle {
    fn is_alive(&self) -> bool {
        self.alive.get()
    }

    fn rect(&self) -> Option<Rect> {
        if self.alive.get() { self.rect.get() } else { None }
    }

    fn set_active(&self, active: bool) {
        self.active.set(active);
        self.toggles.set(self.toggles.get() + 1);
    }
}

/// Host that lays out headings at preset positions.
///
/// Handles created for the same target id replace earlier ones in the
/// lookup tables, mirroring a remount.
#[derive(Debug, Default)]
pub struct MockHost {
    positions: HashMap<String, Rect>,
    headings: HashMap<String, Rc<MockHandle>>,
    nav_items: HashMap<String, Rc<MockHandle>>,
    created: usize,
}

impl MockHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the heading anchored at `target_id` at `top..bottom`.
    #[must_use]
    pub fn with_position(mut self, target_id: impl Into<String>, top: f64, bottom: f64) -> Self {
        self.positions
            .insert(target_id.into(), Rect::new(top, bottom));
        self
    }

    /// Most recent heading handle for `target_id`.
    #[must_use]
    pub fn heading(&self, target_id: &str) -> Option<Rc<MockHandle>> {
        self.headings.get(target_id).map(Rc::clone)
    }

    /// Most recent nav item handle for `target_id`.
    #[must_use]
    pub fn nav_item(&self, target_id: &str) -> Option<Rc<MockHandle>> {
        self.nav_items.get(target_id).map(Rc::clone)
    }

    /// Nav item handles currently marked active.
    #[must_use]
    pub fn active_nav_items(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .nav_items
            .iter()
            .filter(|(_, handle)| handle.is_active())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Total handles created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }

    /// Scroll every heading by `delta`.
    pub fn scroll_by(&self, delta: f64) {
        for handle in self.headings.values() {
            handle.scroll_by(delta);
        }
    }
}

impl MountHost for MockHost {
    fn create_handle(&mut self, element: &ViewElement) -> Rc<dyn ElementHandle> {
        self.created += 1;
        let handle = Rc::new(MockHandle::new());
        match &element.mount {
            Some(MountRole::HeadingAnchor(id)) => {
                if let Some(rect) = self.positions.get(id) {
                    handle.set_rect(rect.top, rect.bottom);
                }
                self.headings.insert(id.clone(), Rc::clone(&handle));
            }
            Some(MountRole::NavItem(id)) => {
                self.nav_items.insert(id.clone(), Rc::clone(&handle));
            }
            None => {}
        }
        handle
    }
}

type Listener = Rc<RefCell<Box<dyn FnMut(&Viewport)>>>;

/// Scroll source driven by [`scroll`](Self::scroll) calls.
#[derive(Default)]
pub struct MockScrollSource {
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u64>,
    unsubscribes: Cell<usize>,
}

impl MockScrollSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a scroll notification to every listener.
    ///
    /// Listeners may unsubscribe while being notified.
    pub fn scroll(&self, viewport: &Viewport) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            let mut listener = listener.borrow_mut();
            (*listener)(viewport);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of `unsubscribe` calls received, including unknown ids.
    #[must_use]
    pub fn unsubscribes(&self) -> usize {
        self.unsubscribes.get()
    }
}

impl ScrollSource for MockScrollSource {
    fn subscribe(&self, listener: Box<dyn FnMut(&Viewport)>) -> ListenerId {
        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.unsubscribes.set(self.unsubscribes.get() + 1);
        self.listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }
}
