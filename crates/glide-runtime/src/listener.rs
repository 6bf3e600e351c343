//! Scroll and frame subscriptions
//!
//! A mounted system registers the triggers it wants during `mount`. The host
//! only dispatches an event to systems holding a listener of that kind, and
//! drops every listener a system owns when it is unmounted.

use crate::host::SystemId;

/// Which host trigger a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Scroll offset or viewport changes
    Scroll,
    /// Rendered frames
    Frame,
}

/// Handle to one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy)]
struct Listener {
    id: ListenerId,
    owner: SystemId,
    kind: ListenerKind,
}

/// All live listeners, in registration order.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, owner: SystemId, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, owner, kind });
        id
    }

    /// Remove a single listener. Returns false if it was already gone.
    pub fn deregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Remove every listener owned by `owner`, returning how many were dropped.
    pub fn deregister_owner(&mut self, owner: SystemId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.owner != owner);
        before - self.listeners.len()
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Owners subscribed to `kind`, in registration order, without duplicates.
    pub fn subscribers(&self, kind: ListenerKind) -> Vec<SystemId> {
        let mut owners: Vec<SystemId> = Vec::new();
        for l in self.listeners.iter().filter(|l| l.kind == kind) {
            if !owners.contains(&l.owner) {
                owners.push(l.owner);
            }
        }
        owners
    }

    /// Number of listeners of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Registration capability handed to a system while it mounts.
pub struct Registrar<'a> {
    registry: &'a mut ListenerRegistry,
    owner: SystemId,
}

impl<'a> Registrar<'a> {
    pub(crate) fn new(registry: &'a mut ListenerRegistry, owner: SystemId) -> Self {
        Self { registry, owner }
    }

    /// Subscribe to scroll and resize events.
    pub fn on_scroll(&mut self) -> ListenerId {
        self.registry.register(self.owner, ListenerKind::Scroll)
    }

    /// Subscribe to rendered frames.
    pub fn on_frame(&mut self) -> ListenerId {
        self.registry.register(self.owner, ListenerKind::Frame)
    }

    pub fn owner(&self) -> SystemId {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_deregister() {
        let mut reg = ListenerRegistry::new();
        let a = SystemId::from_raw(0);
        let scroll = reg.register(a, ListenerKind::Scroll);
        let frame = reg.register(a, ListenerKind::Frame);
        assert_eq!(reg.len(), 2);
        assert_ne!(scroll, frame);

        assert!(reg.deregister(scroll));
        assert!(!reg.deregister(scroll));
        assert!(!reg.is_registered(scroll));
        assert!(reg.is_registered(frame));
        assert_eq!(reg.count(ListenerKind::Scroll), 0);
    }

    #[test]
    fn deregister_owner_drops_all_of_its_listeners() {
        let mut reg = ListenerRegistry::new();
        let a = SystemId::from_raw(0);
        let b = SystemId::from_raw(1);
        reg.register(a, ListenerKind::Scroll);
        reg.register(b, ListenerKind::Scroll);
        reg.register(a, ListenerKind::Frame);

        assert_eq!(reg.deregister_owner(a), 2);
        assert_eq!(reg.subscribers(ListenerKind::Scroll), vec![b]);
        assert!(reg.subscribers(ListenerKind::Frame).is_empty());
    }

    #[test]
    fn subscribers_keep_registration_order_without_duplicates() {
        let mut reg = ListenerRegistry::new();
        let a = SystemId::from_raw(3);
        let b = SystemId::from_raw(1);
        reg.register(a, ListenerKind::Frame);
        reg.register(b, ListenerKind::Frame);
        reg.register(a, ListenerKind::Frame);
        assert_eq!(reg.subscribers(ListenerKind::Frame), vec![a, b]);
        assert_eq!(reg.count(ListenerKind::Frame), 3);
    }

    #[test]
    fn registrar_registers_for_its_owner() {
        let mut reg = ListenerRegistry::new();
        let owner = SystemId::from_raw(7);
        {
            let mut registrar = Registrar::new(&mut reg, owner);
            registrar.on_scroll();
            registrar.on_frame();
            assert_eq!(registrar.owner(), owner);
        }
        assert_eq!(reg.subscribers(ListenerKind::Scroll), vec![owner]);
        assert_eq!(reg.subscribers(ListenerKind::Frame), vec![owner]);
    }
}
