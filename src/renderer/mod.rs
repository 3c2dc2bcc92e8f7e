//! Renderer - Where behaviour output lands
//!
//! Behaviours never touch the host directly. The mount pushes their state
//! through a [`Renderer`], which a host implements over whatever it draws
//! to. Two implementations ship with the crate:
//!
//! - [`RecordingRenderer`] - logs every call and mirrors the resulting page
//!   state (used by tests)
//! - [`TerminalRenderer`] - draws a textual preview of the page with crossterm

mod recording;
mod terminal;

pub use recording::{PageState, RecordingRenderer, RenderOp};
pub use terminal::TerminalRenderer;

use crate::types::{ElementId, Rgba, ScrollRequest, Visual};

/// Sink for visual updates.
///
/// Calls are idempotent: repeating one with the same arguments leaves the
/// page unchanged.
pub trait Renderer {
    /// Mark a nav link active or inactive.
    fn set_link_active(&mut self, link: ElementId, active: bool);

    /// Apply a partial style update. `None` fields are left as they are.
    fn set_visual(&mut self, element: ElementId, visual: &Visual);

    /// Replace the text content of an element.
    fn set_text(&mut self, element: ElementId, text: &str);

    fn set_nav_background(&mut self, nav: ElementId, color: Rgba);

    /// Add (`on = true`) or remove a class.
    fn set_class(&mut self, element: ElementId, class: &str, on: bool);

    /// Start loading a background image. The host answers with
    /// `PageEvent::BackgroundLoaded` once it is ready.
    fn preload_background(&mut self, element: ElementId, url: &str);

    /// Cover-fit a loaded background.
    fn set_background_fit(&mut self, element: ElementId);

    /// Move the viewport.
    fn scroll_to(&mut self, request: ScrollRequest);
}
