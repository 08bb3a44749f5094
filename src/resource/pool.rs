//! Append-only resource pool shared by a process and its children.

use std::fmt::{self, Debug};

use super::traits::Resource;

/// Opaque handle to an entry in a [`ResourcePool`].
///
/// The pool is append-only, so a slot stays valid for the pool's whole
/// lifetime. Slots from one pool must not be used against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

/// Ordered, append-only collection of resources.
///
/// A process owns one pool and lends it to every child for the duration
/// of the child's run; children borrow resources through [`Slot`]
/// handles, never owning them. Insertion order is the scan order of the
/// first-fit acquisition pass. Duplicate names are allowed and not
/// validated.
#[derive(Default)]
pub struct ResourcePool {
    resources: Vec<Box<dyn Resource>>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// Appends a resource to the pool.
    pub fn add(&mut self, resource: impl Resource + 'static) {
        self.resources.push(Box::new(resource));
    }

    /// Appends an already boxed resource to the pool.
    pub fn add_boxed(&mut self, resource: Box<dyn Resource>) {
        self.resources.push(resource);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns the resource behind a slot.
    pub fn get(&self, slot: Slot) -> Option<&dyn Resource> {
        self.resources.get(slot.0).map(|r| r.as_ref())
    }

    /// Returns the resource behind a slot, mutably.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Box<dyn Resource>> {
        self.resources.get_mut(slot.0)
    }

    /// Finds the first available resource with the given name, in
    /// insertion order.
    ///
    /// This is the scan step of the first-fit acquisition pass: first
    /// match wins, and a resource that is currently allocated reports
    /// unavailable and is passed over.
    pub fn find_available(&self, name: &str) -> Option<Slot> {
        self.resources
            .iter()
            .position(|r| r.name() == name && r.is_available_for_use())
            .map(Slot)
    }

    /// Reports whether at least one available resource with the given
    /// name exists. Pure query, reserves nothing.
    pub fn has_available(&self, name: &str) -> bool {
        self.find_available(name).is_some()
    }

    /// Iterates over `(Slot, &resource)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &dyn Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (Slot(i), r.as_ref()))
    }
}

impl Debug for ResourcePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("resources", &self.resources)
            .finish()
    }
}
