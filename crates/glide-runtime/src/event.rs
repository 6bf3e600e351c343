//! Events delivered by the page host

/// An event fired by the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The page scrolled to a new vertical offset (pixels).
    Scroll { offset: f64 },
    /// The viewport changed height (pixels).
    Resize { viewport_height: f64 },
    /// A frame was rendered; `dt` is the elapsed time in seconds.
    Frame { dt: f64 },
}
