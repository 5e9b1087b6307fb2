//! Host element handles.

/// Viewport-relative vertical extent of an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Distance from the top of the viewport to the element's top edge.
    pub top: f64,
    /// Distance from the top of the viewport to the element's bottom edge.
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }
}

/// A mounted element owned by the host.
///
/// Handles may outlive the element they refer to. Callers check
/// [`is_alive`](Self::is_alive) before relying on a handle and treat a
/// missing [`rect`](Self::rect) as "not laid out".
pub trait ElementHandle {
    /// Whether the element is still attached.
    fn is_alive(&self) -> bool;

    /// Current position, or `None` if the element is detached.
    ///
    /// Positions change on scroll and are never cached.
    fn rect(&self) -> Option<Rect>;

    /// Toggle the active marker (for nav items).
    fn set_active(&self, active: bool);
}
