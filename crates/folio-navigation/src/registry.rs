//! Shared registry pairing heading anchors with nav items.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::handle::ElementHandle;

#[derive(Default)]
struct Entry {
    heading: Option<Rc<dyn ElementHandle>>,
    nav: Option<Rc<dyn ElementHandle>>,
}

impl Entry {
    fn complete(&self) -> Option<(&Rc<dyn ElementHandle>, &Rc<dyn ElementHandle>)> {
        Some((self.heading.as_ref()?, self.nav.as_ref()?))
    }

    fn is_vacant(&self) -> bool {
        self.heading.is_none() && self.nav.is_none()
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Heading,
    Nav,
}

impl Slot {
    fn name(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Nav => "nav",
        }
    }

    fn of(self, entry: &mut Entry) -> &mut Option<Rc<dyn ElementHandle>> {
        match self {
            Self::Heading => &mut entry.heading,
            Self::Nav => &mut entry.nav,
        }
    }
}

/// A complete registry entry.
#[derive(Clone)]
pub struct RegistryRef {
    /// Anchor id.
    pub id: String,
    /// Heading element in the content panel.
    pub heading: Rc<dyn ElementHandle>,
    /// Link element in the navigation panel.
    pub nav: Rc<dyn ElementHandle>,
}

impl std::fmt::Debug for RegistryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryRef")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Mapping from anchor id to the heading and nav item mounted for it.
///
/// Cloning yields another reference to the same registry, so the content
/// and navigation panels can each hold one. Mounts may arrive in any order;
/// an entry becomes complete once both slots are filled.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use folio_navigation::{ElementHandle, Rect, TocRegistry};
///
/// struct Fixed(f64);
///
/// impl ElementHandle for Fixed {
///     fn is_alive(&self) -> bool { true }
///     fn rect(&self) -> Option<Rect> { Some(Rect::new(self.0, self.0 + 20.0)) }
///     fn set_active(&self, _active: bool) {}
/// }
///
/// let registry = TocRegistry::new();
/// registry.mount_nav_item("1-Intro", Rc::new(Fixed(0.0)));
/// assert!(!registry.is_complete("1-Intro"));
///
/// registry.mount_heading("1-Intro", Rc::new(Fixed(100.0)));
/// assert!(registry.is_complete("1-Intro"));
/// ```
#[derive(Clone, Default)]
pub struct TocRegistry {
    entries: Rc<RefCell<HashMap<String, Entry>>>,
}

impl TocRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the heading element for `id`, replacing any previous one.
    pub fn mount_heading(&self, id: &str, handle: Rc<dyn ElementHandle>) {
        self.mount(Slot::Heading, id, handle);
    }

    /// Record the nav item element for `id`, replacing any previous one.
    pub fn mount_nav_item(&self, id: &str, handle: Rc<dyn ElementHandle>) {
        self.mount(Slot::Nav, id, handle);
    }

    /// Clear the heading slot of `id` if it still holds `handle`.
    pub fn unmount_heading(&self, id: &str, handle: &Rc<dyn ElementHandle>) {
        self.unmount(Slot::Heading, id, handle);
    }

    /// Clear the nav item slot of `id` if it still holds `handle`.
    pub fn unmount_nav_item(&self, id: &str, handle: &Rc<dyn ElementHandle>) {
        self.unmount(Slot::Nav, id, handle);
    }

    fn mount(&self, slot: Slot, id: &str, handle: Rc<dyn ElementHandle>) {
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(id.to_owned()).or_default();
        let replaced = slot.of(entry).replace(handle).is_some();
        tracing::trace!(id, slot = slot.name(), replaced, "Mounted registry slot");
    }

    fn unmount(&self, slot: Slot, id: &str, handle: &Rc<dyn ElementHandle>) {
        let mut entries = self.entries.borrow_mut();
        let Some(entry) = entries.get_mut(id) else {
            return;
        };

        let current = slot.of(entry);
        if !current.as_ref().is_some_and(|h| Rc::ptr_eq(h, handle)) {
            tracing::trace!(id, slot = slot.name(), "Skipping unmount of replaced handle");
            return;
        }
        *current = None;

        if entry.is_vacant() {
            entries.remove(id);
        }
    }

    /// Call `f` with the id, heading and nav item of every complete entry.
    ///
    /// Iteration order is unspecified. `f` may use the registry.
    pub fn for_each_complete<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Rc<dyn ElementHandle>, &Rc<dyn ElementHandle>),
    {
        for reference in self.complete_entries() {
            f(&reference.id, &reference.heading, &reference.nav);
        }
    }

    /// Complete entries with a laid-out heading, ordered by vertical position.
    ///
    /// Positions are queried on every call. Entries whose heading is dead or
    /// has no rect are skipped.
    #[must_use]
    pub fn collect_ordered_references(&self) -> Vec<RegistryRef> {
        let mut positioned: Vec<(f64, RegistryRef)> = self
            .complete_entries()
            .into_iter()
            .filter(|reference| reference.heading.is_alive())
            .filter_map(|reference| Some((reference.heading.rect()?.top, reference)))
            .collect();

        positioned.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        positioned.into_iter().map(|(_, reference)| reference).collect()
    }

    fn complete_entries(&self) -> Vec<RegistryRef> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|(id, entry)| {
                let (heading, nav) = entry.complete()?;
                Some(RegistryRef {
                    id: id.clone(),
                    heading: Rc::clone(heading),
                    nav: Rc::clone(nav),
                })
            })
            .collect()
    }

    /// Whether `id` has both a heading and a nav item.
    #[must_use]
    pub fn is_complete(&self, id: &str) -> bool {
        self.entries
            .borrow()
            .get(id)
            .is_some_and(|entry| entry.complete().is_some())
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Number of entries, complete or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl std::fmt::Debug for TocRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TocRegistry")
            .field("entries", &self.len())
            .finish()
    }
}
