//! Glide Runtime - Host event loop infrastructure
//!
//! Provides the building blocks a page host uses to drive Glide scenes:
//! - `FrameClock` - per-frame delta measurement
//! - `ScrollConfig` / `ScrollState` - raw scroll offset to scroll fraction
//! - `HostEvent` / `EventBus` - FIFO queue of scroll, resize, and frame events
//! - `ListenerRegistry` - scroll and frame subscriptions per mounted system
//! - `RuntimeSystem` - trait for systems mounted on a `Host`

mod clock;
mod event;
mod event_bus;
mod host;
mod listener;
mod scroll;
mod system;

pub use clock::FrameClock;
pub use event::HostEvent;
pub use event_bus::EventBus;
pub use host::{Host, SystemId};
pub use listener::{ListenerId, ListenerKind, ListenerRegistry, Registrar};
pub use scroll::{ScrollConfig, ScrollState};
pub use system::RuntimeSystem;
