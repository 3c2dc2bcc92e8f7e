//! Terminal preview renderer.
//!
//! Draws a compact textual view of the page: the nav bar with the active
//! link and clock, the typed identity line, then one row per animated
//! element showing whether it has been revealed.
//!
//! ```text
//!  home  [about]  projects                      09:41 IST
//! > Systems engineer_                   parallax 150px
//!   ✓ Rust compiler
//!   · Search engine
//! ```

use std::collections::HashMap;
use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::document::Document;
use crate::error::Result;
use crate::state::gallery::ZOOMED_CLASS;
use crate::types::{ElementId, Rgba, Roles, ScrollRequest, Transform, Visual};

use super::recording::{PageState, RenderOp};
use super::Renderer;

/// Renderer drawing to a crossterm-compatible writer.
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
    labels: HashMap<ElementId, String>,
    links: Vec<ElementId>,
    clock: Option<ElementId>,
    identity: Option<ElementId>,
    hero: Option<ElementId>,
    animated: Vec<ElementId>,
    state: PageState,
    pending_scroll: Option<ScrollRequest>,
    dirty: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, document: &Document, width: u16) -> Self {
        let labels = document
            .iter()
            .map(|(id, el)| {
                let label = el
                    .anchor
                    .clone()
                    .or_else(|| (!el.text.is_empty()).then(|| el.text.clone()))
                    .or_else(|| el.href.as_deref().map(|h| h.trim_start_matches('#').to_string()))
                    .unwrap_or_else(|| id.to_string());
                (id, label)
            })
            .collect();

        Self {
            out,
            width,
            labels,
            links: document.nav_links().iter().map(|l| l.element).collect(),
            clock: document.first(Roles::CLOCK).map(|(id, _)| id),
            identity: document.first(Roles::IDENTITY).map(|(id, _)| id),
            hero: document.first(Roles::HERO).map(|(id, _)| id),
            animated: document.with_roles(Roles::REVEAL).map(|(id, _)| id).collect(),
            state: PageState::default(),
            pending_scroll: None,
            dirty: true,
        }
    }

    pub fn set_width(&mut self, width: u16) {
        if self.width != width {
            self.width = width;
            self.dirty = true;
        }
    }

    /// Last scroll request not yet taken by the host.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Preview rows, unclipped.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.animated.len() + 2);

        let nav = self
            .links
            .iter()
            .map(|id| {
                let label = self.label(*id);
                if self.state.is_link_active(*id) {
                    format!("[{label}]")
                } else {
                    format!(" {label} ")
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let clock = self
            .clock
            .and_then(|id| self.state.text(id))
            .unwrap_or_default();
        lines.push(align_right(&nav, clock, self.width as usize));

        let typed = self
            .identity
            .map(|id| self.state.text(id).unwrap_or_else(|| self.label(id)))
            .unwrap_or_default();
        let parallax = match self.hero.map(|id| self.state.visual(id).transform) {
            Some(Some(Transform::TranslateY(y))) if y != 0.0 => format!("parallax {y}px"),
            _ => String::new(),
        };
        lines.push(align_right(&format!("> {typed}_"), &parallax, self.width as usize));

        for id in &self.animated {
            let visual = self.state.visual(*id);
            let mark = if visual.opacity == Some(1.0) { '✓' } else { '·' };
            let mut row = format!("  {mark} {}", self.label(*id));
            if matches!(visual.transform, Some(Transform::Tilt { .. })) {
                row.push_str("  (tilted)");
            }
            if self.state.has_class(*id, ZOOMED_CLASS) {
                row.push_str("  (zoomed)");
            }
            lines.push(row);
        }

        lines
    }

    /// Redraw if anything changed since the last flush.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let width = self.width as usize;
        let solid = self.state.nav_background().is_some_and(|c| c.a >= 0.98);

        for (row, line) in self.lines().iter().enumerate() {
            queue!(self.out, MoveTo(0, row as u16), Clear(ClearType::CurrentLine))?;
            if row == 0 && solid {
                queue!(self.out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(self.out, Print(clip(line, width)))?;
            if row == 0 && solid {
                queue!(self.out, SetAttribute(Attribute::Reset))?;
            }
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))?;

        self.out.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn label(&self, id: ElementId) -> &str {
        self.labels.get(&id).map(String::as_str).unwrap_or_default()
    }

    fn apply(&mut self, op: RenderOp) {
        self.state.apply(&op);
        self.dirty = true;
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn set_link_active(&mut self, link: ElementId, active: bool) {
        self.apply(RenderOp::LinkActive { link, active });
    }

    fn set_visual(&mut self, element: ElementId, visual: &Visual) {
        self.apply(RenderOp::Visual {
            element,
            visual: *visual,
        });
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.apply(RenderOp::Text {
            element,
            text: text.to_string(),
        });
    }

    fn set_nav_background(&mut self, nav: ElementId, color: Rgba) {
        self.apply(RenderOp::NavBackground { nav, color });
    }

    fn set_class(&mut self, element: ElementId, class: &str, on: bool) {
        self.apply(RenderOp::Class {
            element,
            class: class.to_string(),
            on,
        });
    }

    fn preload_background(&mut self, element: ElementId, url: &str) {
        self.state.apply(&RenderOp::PreloadBackground {
            element,
            url: url.to_string(),
        });
    }

    fn set_background_fit(&mut self, element: ElementId) {
        self.state.apply(&RenderOp::BackgroundFit { element });
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        self.pending_scroll = Some(request);
    }
}

// =============================================================================
// TEXT FITTING
// =============================================================================

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` fitting in `width` columns.
fn clip(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        used += c.width().unwrap_or(0);
        if used > width {
            return &s[..i];
        }
    }
    s
}

/// `left` padded so `right` ends at column `width`. Falls back to a single
/// space separator when there is no room.
fn align_right(left: &str, right: &str, width: usize) -> String {
    if right.is_empty() {
        return left.to_string();
    }
    let used = display_width(left) + display_width(right);
    let pad = width.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(pad))
}
