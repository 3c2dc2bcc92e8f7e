//! State Module - Page behaviours
//!
//! Each behaviour is a small state machine fed by page events:
//!
//! - **Nav** - Active link from the scroll offset
//! - **Reveal** - One-shot entrance animations driven by visibility
//! - **Typing** - Identity line typed out one grapheme at a time
//! - **Anchor** - Smooth scrolling to fragment targets below the nav
//! - **Scroll FX** - Hero parallax and nav backdrop
//! - **Tilt** - Project card tilt under the pointer
//! - **Gallery** - Click-to-zoom photos
//! - **Clock** - Time of day in the nav
//! - **Images** - Lazy image fade-in and event card backgrounds
//!
//! Observable state lives in signals; the mount wires effects from them to
//! a renderer.

pub mod anchor;
pub mod clock;
pub mod gallery;
pub mod images;
pub mod nav;
pub mod reveal;
pub mod scroll_fx;
pub mod tilt;
pub mod typing;

pub use anchor::*;
pub use clock::*;
pub use gallery::*;
pub use images::*;
pub use nav::*;
pub use reveal::*;
pub use scroll_fx::*;
pub use tilt::*;
pub use typing::*;
