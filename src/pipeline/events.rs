//! Page events and notification sources.
//!
//! The host delivers everything the behaviours react to as a [`PageEvent`].
//! Two capabilities let hosts (and tests) plug in where the notifications
//! come from:
//!
//! - [`ScrollSource`] - anything that knows the current scroll offset
//! - [`VisibilitySource`] - anything that can watch elements enter the viewport
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::pipeline::events::{PageEvent, ScrollEvent};
//!
//! handle.dispatch(PageEvent::Scroll(ScrollEvent::new(420.0)));
//! handle.dispatch(PageEvent::AnchorClick { href: "#projects".into() });
//! ```

use crate::types::ElementId;

use super::timers::TimerTask;

// =============================================================================
// EVENT TYPES
// =============================================================================

/// Vertical scroll notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// Document scroll offset in pixels (never negative).
    pub offset: f32,
}

impl ScrollEvent {
    pub fn new(offset: f32) -> Self {
        Self {
            offset: offset.max(0.0),
        }
    }
}

/// Visibility notification for one observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEvent {
    pub target: ElementId,
    /// Fraction of the target's area inside the viewport (0.0..=1.0).
    pub ratio: f32,
    pub is_intersecting: bool,
}

impl IntersectionEvent {
    pub fn visible(target: ElementId, ratio: f32) -> Self {
        Self {
            target,
            ratio,
            is_intersecting: true,
        }
    }

    pub fn hidden(target: ElementId) -> Self {
        Self {
            target,
            ratio: 0.0,
            is_intersecting: false,
        }
    }
}

/// Everything a mounted page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scroll(ScrollEvent),
    /// Viewport size changed (geometry of elements is not re-measured).
    Resize { width: f32, height: f32 },
    Intersection(IntersectionEvent),
    Timer(TimerTask),
    /// Pointer moved over an element, in viewport coordinates.
    PointerMove {
        target: ElementId,
        client_x: f32,
        client_y: f32,
    },
    PointerLeave { target: ElementId },
    Click { target: ElementId },
    /// A fragment link was activated.
    AnchorClick { href: String },
    ImageLoaded { target: ElementId },
    BackgroundLoaded { target: ElementId },
}

// =============================================================================
// SOURCES
// =============================================================================

/// Provides the current vertical scroll offset.
pub trait ScrollSource {
    fn scroll_offset(&self) -> f32;
}

/// Scroll source pinned at one offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticScroll(pub f32);

impl ScrollSource for StaticScroll {
    fn scroll_offset(&self) -> f32 {
        self.0
    }
}

/// Handle for one element observation. Pass back to `unobserve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(pub u64);

/// Watches elements for viewport intersection.
///
/// Observations stay active until explicitly unobserved.
pub trait VisibilitySource {
    /// Start observing `target`; notifications use `threshold` as the
    /// visible fraction of interest.
    fn observe(&mut self, target: ElementId, threshold: f32) -> Subscription;

    /// Stop observing. Unknown subscriptions are ignored.
    fn unobserve(&mut self, subscription: Subscription);
}
