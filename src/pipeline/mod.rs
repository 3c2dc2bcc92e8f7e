//! Event Pipeline
//!
//! This module connects host notifications to the page behaviours and the
//! behaviours to the renderer.
//!
//! # Pipeline Architecture
//!
//! ```text
//! PageEvent → MountHandle::dispatch → behaviour state (signals) → effects → Renderer
//!                 ↑                         │
//!     ViewportObserver / TimerQueue ←───────┘ (observe, unobserve, set_timeout)
//! ```
//!
//! ## Data Flow
//!
//! 1. **events** - What the host delivers (scroll, pointer, load, timer)
//! 2. **observer** - Turns scroll and resize into intersection records
//! 3. **timers** - Virtual clock for typing and the nav clock
//! 4. **mount** - Owns the behaviours and the effects feeding the renderer
//!
//! ## Key Design Principles
//!
//! - **Pure decisions**: active link and reveal tests are plain functions
//! - **Side effects in effects**: only mount effects and direct event
//!   responses call the renderer
//! - **Deterministic time**: nothing reads the wall clock except the clock text

pub mod events;
pub mod mount;
pub mod observer;
pub mod timers;

// Re-exports
pub use events::{
    IntersectionEvent, PageEvent, ScrollEvent, ScrollSource, StaticScroll, Subscription,
    VisibilitySource,
};
pub use mount::{mount, mount_with_clock, MountHandle};
pub use observer::{intersection_ratio, ViewportObserver};
pub use timers::{TimerId, TimerQueue, TimerTask};
