//! # spark-folio
//!
//! Reactive page behaviours for a single-page portfolio.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A page is a [`Document`] snapshot: elements with role markers and
//! document-relative rects, usually produced by [`layout::layout_page`].
//! Behaviours are small state machines fed by [`PageEvent`]s. Their
//! observable state lives in signals, and the effects created at mount
//! push every change to a [`Renderer`]:
//!
//! ```text
//! PageEvent → MountHandle::dispatch → behaviour signals → effects → Renderer
//! ```
//!
//! The core behaviours:
//!
//! - **Navigation highlighting** - the nav link of the section under the
//!   header is active, derived purely from the scroll offset
//! - **Reveal animation** - cards, events, roles and photos fade in once,
//!   the first time enough of them is visible
//! - **Typed text** - the identity line is typed out after a short delay
//!
//! plus decorative glue: clock, smooth anchor scrolling, parallax hero, nav
//! backdrop, card tilt, photo zoom, image fade-in and event backgrounds.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementId, Rect, Roles, Visual, etc.)
//! - [`document`] - Page snapshot and element queries
//! - [`layout`] - Taffy layout of a page outline into a document
//! - [`state`] - The behaviours
//! - [`pipeline`] - Events, visibility observer, timers, mount
//! - [`renderer`] - Renderer trait, recording and terminal renderers

pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::PageConfig;
pub use document::{Document, Element, NavLink, Section};
pub use error::{FolioError, Result};

pub use layout::{layout_page, Block, Direction};

pub use renderer::{PageState, RecordingRenderer, RenderOp, Renderer, TerminalRenderer};

pub use pipeline::{
    mount, mount_with_clock, IntersectionEvent, MountHandle, PageEvent, ScrollEvent,
    ScrollSource, StaticScroll, Subscription, TimerQueue, TimerTask, ViewportObserver,
    VisibilitySource,
};

pub use state::{
    // Navigation
    activation_window, compute_active_link, NavHighlighter,
    // Reveal
    should_reveal, RevealAnimator, RevealOptions,
    // Typing
    TypedText,
    // Clock
    format_clock, Clock, FixedTime, LocalTime, TimeSource,
};
