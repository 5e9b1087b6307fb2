//! Mounting rendered views into a host.

use std::rc::Rc;

use folio_renderer::{MountRole, ViewElement, ViewNode};

use crate::handle::ElementHandle;
use crate::registry::TocRegistry;

/// Creates host elements for view elements.
pub trait MountHost {
    /// Materialize `element` and return a handle to it.
    fn create_handle(&mut self, element: &ViewElement) -> Rc<dyn ElementHandle>;
}

/// Registrations made by one [`mount_view`] call.
///
/// Dropping the value unmounts it.
#[must_use = "dropping a MountedView unregisters its elements"]
pub struct MountedView {
    registry: TocRegistry,
    registrations: Vec<(MountRole, Rc<dyn ElementHandle>)>,
}

impl MountedView {
    /// Number of registry slots this view filled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Reverse this view's registrations.
    ///
    /// Slots that have since been taken over by another mount are left
    /// alone. Calling this more than once has no further effect.
    pub fn unmount(&mut self) {
        for (role, handle) in self.registrations.drain(..).rev() {
            match role {
                MountRole::HeadingAnchor(id) => self.registry.unmount_heading(&id, &handle),
                MountRole::NavItem(id) => self.registry.unmount_nav_item(&id, &handle),
            }
        }
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount `view`, registering headings and nav items with `registry`.
///
/// Elements carrying a [`MountRole`] get a handle from `host`; the rest of
/// the tree needs no registry bookkeeping and is skipped.
pub fn mount_view(
    view: &ViewNode,
    host: &mut dyn MountHost,
    registry: &TocRegistry,
) -> MountedView {
    let mut registrations = Vec::new();

    for element in view.elements() {
        let Some(role) = &element.mount else {
            continue;
        };

        let handle = host.create_handle(element);
        match role {
            MountRole::HeadingAnchor(id) => registry.mount_heading(id, Rc::clone(&handle)),
            MountRole::NavItem(id) => registry.mount_nav_item(id, Rc::clone(&handle)),
        }
        registrations.push((role.clone(), handle));
    }

    tracing::debug!(registrations = registrations.len(), "Mounted view");

    MountedView {
        registry: registry.clone(),
        registrations,
    }
}
