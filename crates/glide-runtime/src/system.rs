//! Runtime system trait

use crate::listener::Registrar;
use crate::scroll::ScrollState;
use glide_core::Result;
use std::any::Any;

/// A system mounted on a `Host` and driven by scroll and frame events.
///
/// Scroll and frame handlers run on the host thread and must return promptly.
/// Events of one kind are delivered in the order the host received them.
pub trait RuntimeSystem {
    /// Called once when mounted. Register the triggers the system needs.
    fn mount(&mut self, registrar: &mut Registrar<'_>, scroll: &ScrollState) -> Result<()>;

    /// Called after every scroll or resize event, if subscribed.
    fn on_scroll(&mut self, scroll: &ScrollState) -> Result<()>;

    /// Called once per rendered frame, if subscribed.
    fn on_frame(&mut self, dt: f64) -> Result<()>;

    /// Called when the system is unmounted. Its listeners are already gone.
    fn unmount(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
