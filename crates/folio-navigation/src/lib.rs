//! Navigation panel synchronization for rendered Folio documents.
//!
//! A rendered page has two panels: the content (headings carrying
//! [`MountRole::HeadingAnchor`](folio_renderer::MountRole)) and the navigation
//! panel built by [`nav_panel`] (links carrying `MountRole::NavItem`). Both are
//! mounted into a host with [`mount_view`], which pairs them up in a shared
//! [`TocRegistry`] as they appear, in any order.
//!
//! [`ScrollTracker`] then keeps exactly one nav link marked active: the one
//! for the last heading scrolled past the activation line.
//!
//! The host is abstracted by three small traits:
//! - [`ElementHandle`]: position, liveness and active marker of one element
//! - [`MountHost`]: creates handles for mounted elements
//! - [`ScrollSource`]: delivers scroll notifications
//!
//! [`MockHost`] and [`MockScrollSource`] implement them in memory (behind
//! the `mock` feature flag).
//!
//! Everything here is single-threaded; the registry and tracker are `!Send`.

mod handle;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod mount;
mod nav;
mod registry;
mod tracker;

pub use handle::{ElementHandle, Rect};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockHandle, MockHost, MockScrollSource};
pub use mount::{MountHost, MountedView, mount_view};
pub use nav::{nav_panel, nav_panel_to_level, page_view};
pub use registry::{RegistryRef, TocRegistry};
pub use tracker::{
    DEFAULT_ACTIVATION_RATIO, ListenerId, ScrollSource, ScrollTracker, TrackerOptions,
    TrackerSubscription, TrackerUpdate, Viewport,
};
