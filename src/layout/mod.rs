//! Layout Module
//!
//! Page geometry for the behaviours, computed with Taffy.
//!
//! # Architecture
//!
//! Hosts describe the page as a tree of [`Block`]s with minimum heights.
//! The bridge:
//!
//! 1. Converts Blocks → Taffy styles (fixed blocks become absolute)
//! 2. Builds the Taffy tree under one column root
//! 3. Extracts absolute rects into a [`Document`](crate::Document)
//!
//! The result is a snapshot. Behaviours never re-measure it.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::layout::{layout_page, Block};
//!
//! let doc = layout_page(&[
//!     Block::nav(64.0).child(Block::nav_link("about", 80.0)),
//!     Block::section("about", 600.0),
//! ], 1280.0)?;
//! ```

mod page_layout;

pub use page_layout::*;
