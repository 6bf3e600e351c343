//! Host driver owning mounted systems and dispatching events to them

use crate::clock::FrameClock;
use crate::event::HostEvent;
use crate::event_bus::EventBus;
use crate::listener::{ListenerKind, ListenerRegistry, Registrar};
use crate::scroll::{ScrollConfig, ScrollState};
use crate::system::RuntimeSystem;
use glide_core::{GlideError, Result};
use tracing::{debug, info, warn};

/// Identifies a system mounted on a `Host`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(usize);

impl SystemId {
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

/// Single-threaded event loop for a page.
///
/// The page pushes scroll, resize, and frame events; `pump` delivers them to
/// subscribed systems in arrival order. Handler errors are logged and do not
/// stop delivery.
pub struct Host {
    systems: Vec<Option<Box<dyn RuntimeSystem>>>,
    listeners: ListenerRegistry,
    bus: EventBus,
    clock: FrameClock,
    scroll: ScrollState,
}

impl Host {
    pub fn new(config: ScrollConfig, viewport_height: f64) -> Self {
        Self {
            systems: Vec::new(),
            listeners: ListenerRegistry::new(),
            bus: EventBus::new(),
            clock: FrameClock::new(),
            scroll: ScrollState::new(config, viewport_height),
        }
    }

    /// Mount a system and let it register its listeners.
    ///
    /// If `mount` fails, any listeners it registered are dropped again. Slots
    /// freed by `unmount` are reused, so a stale `SystemId` may name a newer
    /// system.
    pub fn mount(&mut self, mut system: Box<dyn RuntimeSystem>) -> Result<SystemId> {
        let slot = self
            .systems
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.systems.len());
        let id = SystemId(slot);
        let mounted = {
            let mut registrar = Registrar::new(&mut self.listeners, id);
            system.mount(&mut registrar, &self.scroll)
        };
        if let Err(e) = mounted {
            self.listeners.deregister_owner(id);
            return Err(e);
        }
        info!(system = system.name(), id = id.0, "mounted system");
        if slot == self.systems.len() {
            self.systems.push(Some(system));
        } else {
            self.systems[slot] = Some(system);
        }
        Ok(id)
    }

    /// Deregister a system's listeners, then unmount it and hand it back.
    pub fn unmount(&mut self, id: SystemId) -> Result<Box<dyn RuntimeSystem>> {
        let mut system = self
            .systems
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or_else(|| GlideError::RuntimeError(format!("system {} is not mounted", id.0)))?;
        let dropped = self.listeners.deregister_owner(id);
        system.unmount()?;
        info!(system = system.name(), listeners = dropped, "unmounted system");
        Ok(system)
    }

    /// Unmount every system still mounted, in mount order.
    pub fn shutdown(&mut self) {
        for raw in 0..self.systems.len() {
            if self.systems[raw].is_some() {
                if let Err(e) = self.unmount(SystemId(raw)) {
                    warn!("unmount failed during shutdown: {}", e);
                }
            }
        }
    }

    /// Queue an event for the next `pump`.
    pub fn push(&mut self, event: HostEvent) {
        self.bus.push(event);
    }

    /// Deliver all queued events. Returns the number of events processed.
    pub fn pump(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.bus.pop() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Deliver queued events, then a frame timed by the wall clock.
    pub fn tick_frame(&mut self) -> usize {
        let processed = self.pump();
        let dt = self.clock.tick();
        self.notify_frame(dt);
        processed + 1
    }

    fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Scroll { offset } => {
                self.scroll.offset = offset;
                self.notify_scroll();
            }
            HostEvent::Resize { viewport_height } => {
                self.scroll.viewport_height = viewport_height;
                self.notify_scroll();
            }
            HostEvent::Frame { dt } => {
                let dt = self.clock.advance(dt);
                self.notify_frame(dt);
            }
        }
    }

    fn notify_frame(&mut self, dt: f64) {
        for id in self.listeners.subscribers(ListenerKind::Frame) {
            if let Some(Some(system)) = self.systems.get_mut(id.0) {
                if let Err(e) = system.on_frame(dt) {
                    warn!(system = system.name(), "frame handler failed: {}", e);
                }
            }
        }
    }

    fn notify_scroll(&mut self) {
        debug!(
            offset = self.scroll.offset,
            fraction = self.scroll.fraction(),
            "scroll"
        );
        let scroll = self.scroll;
        for id in self.listeners.subscribers(ListenerKind::Scroll) {
            if let Some(Some(system)) = self.systems.get_mut(id.0) {
                if let Err(e) = system.on_scroll(&scroll) {
                    warn!(system = system.name(), "scroll handler failed: {}", e);
                }
            }
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn is_mounted(&self, id: SystemId) -> bool {
        matches!(self.systems.get(id.0), Some(Some(_)))
    }

    /// Borrow a mounted system as its concrete type.
    pub fn system<T: 'static>(&self, id: SystemId) -> Option<&T> {
        self.systems
            .get(id.0)?
            .as_ref()?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutably borrow a mounted system as its concrete type.
    pub fn system_mut<T: 'static>(&mut self, id: SystemId) -> Option<&mut T> {
        self.systems
            .get_mut(id.0)?
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<T>()
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.shutdown();
    }
}
