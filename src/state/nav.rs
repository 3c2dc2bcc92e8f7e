//! Navigation Highlighter - Active section tracking
//!
//! Maps the scroll offset to the section currently under the header and
//! marks the nav link pointing at it as active.
//!
//! # Activation windows
//!
//! Each section owns the half-open scroll range
//! `[top - header_offset, top - header_offset + height)`. The current
//! section is the last one, in document order, whose window contains the
//! offset. Windows are computed from the geometry snapshot taken at setup.
//! There is no hysteresis: a boundary flickers if the offset does.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::nav::{compute_active_link, NavHighlighter};
//!
//! let sections = vec![Section::new("a", 0.0, 500.0), Section::new("b", 500.0, 500.0)];
//! assert_eq!(compute_active_link(450.0, &sections, 100.0), Some("b"));
//! ```

use std::ops::Range;

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::document::{NavLink, Section};
use crate::pipeline::events::ScrollEvent;

// =============================================================================
// PURE FUNCTIONS
// =============================================================================

/// Scroll range in which `section` is current.
///
/// Zero or negative heights give an empty range.
pub fn activation_window(section: &Section, header_offset: f32) -> Range<f32> {
    let start = section.top - header_offset;
    start..start + section.height.max(0.0)
}

/// Id of the section whose window contains `offset`.
///
/// When windows overlap the last matching section wins.
pub fn compute_active_link<'a>(
    offset: f32,
    sections: &'a [Section],
    header_offset: f32,
) -> Option<&'a str> {
    sections
        .iter()
        .rev()
        .find(|section| activation_window(section, header_offset).contains(&offset))
        .map(|section| section.id.as_str())
}

// =============================================================================
// HIGHLIGHTER
// =============================================================================

/// Keeps exactly the link of the current section active.
pub struct NavHighlighter {
    sections: Vec<Section>,
    links: Vec<NavLink>,
    header_offset: f32,
    active: Signal<Option<String>>,
}

impl NavHighlighter {
    pub fn new(sections: Vec<Section>, links: Vec<NavLink>, header_offset: f32) -> Self {
        Self {
            sections,
            links,
            header_offset,
            active: signal(None),
        }
    }

    /// Recompute the current section. Returns true if it changed.
    pub fn handle(&mut self, event: &ScrollEvent) -> bool {
        let next = compute_active_link(event.offset, &self.sections, self.header_offset)
            .map(str::to_string);

        if self.active.get() == next {
            return false;
        }

        debug!(offset = event.offset, section = ?next, "active section changed");
        self.active.set(next);
        true
    }

    /// Id of the current section.
    pub fn active(&self) -> Option<String> {
        self.active.get()
    }

    /// Signal holding the current section id (for render effects).
    pub fn active_signal(&self) -> Signal<Option<String>> {
        self.active.clone()
    }

    pub fn is_link_active(&self, link: &NavLink) -> bool {
        link_is_active(link, self.active().as_deref())
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

/// Whether `link` should be active while `active` is the current section.
pub fn link_is_active(link: &NavLink, active: Option<&str>) -> bool {
    match (link.target(), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
