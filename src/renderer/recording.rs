//! Recording renderer.
//!
//! Keeps an ordered log of every call and a [`PageState`] mirroring what
//! the page would look like after them.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{ElementId, Rgba, ScrollRequest, Visual};

use super::Renderer;

/// One renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    LinkActive { link: ElementId, active: bool },
    Visual { element: ElementId, visual: Visual },
    Text { element: ElementId, text: String },
    NavBackground { nav: ElementId, color: Rgba },
    Class { element: ElementId, class: String, on: bool },
    PreloadBackground { element: ElementId, url: String },
    BackgroundFit { element: ElementId },
    ScrollTo(ScrollRequest),
}

impl RenderOp {
    /// Element the call targets, if any.
    pub fn element(&self) -> Option<ElementId> {
        match self {
            RenderOp::LinkActive { link, .. } => Some(*link),
            RenderOp::Visual { element, .. }
            | RenderOp::Text { element, .. }
            | RenderOp::Class { element, .. }
            | RenderOp::PreloadBackground { element, .. }
            | RenderOp::BackgroundFit { element } => Some(*element),
            RenderOp::NavBackground { nav, .. } => Some(*nav),
            RenderOp::ScrollTo(_) => None,
        }
    }
}

// =============================================================================
// PAGE STATE
// =============================================================================

/// Current look of the page after a sequence of renderer calls.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    active_links: BTreeSet<ElementId>,
    visuals: HashMap<ElementId, Visual>,
    texts: HashMap<ElementId, String>,
    nav_background: Option<Rgba>,
    classes: HashMap<ElementId, BTreeSet<String>>,
    preloads: Vec<(ElementId, String)>,
    fitted: HashSet<ElementId>,
}

impl PageState {
    pub fn apply(&mut self, op: &RenderOp) {
        match op {
            RenderOp::LinkActive { link, active } => {
                if *active {
                    self.active_links.insert(*link);
                } else {
                    self.active_links.remove(link);
                }
            }
            RenderOp::Visual { element, visual } => {
                let current = self.visuals.entry(*element).or_default();
                if visual.opacity.is_some() {
                    current.opacity = visual.opacity;
                }
                if visual.transform.is_some() {
                    current.transform = visual.transform;
                }
                if visual.transition.is_some() {
                    current.transition = visual.transition;
                }
            }
            RenderOp::Text { element, text } => {
                self.texts.insert(*element, text.clone());
            }
            RenderOp::NavBackground { color, .. } => self.nav_background = Some(*color),
            RenderOp::Class { element, class, on } => {
                let classes = self.classes.entry(*element).or_default();
                if *on {
                    classes.insert(class.clone());
                } else {
                    classes.remove(class);
                }
            }
            RenderOp::PreloadBackground { element, url } => {
                self.preloads.push((*element, url.clone()));
            }
            RenderOp::BackgroundFit { element } => {
                self.fitted.insert(*element);
            }
            RenderOp::ScrollTo(_) => {}
        }
    }

    /// Active links in element order.
    pub fn active_links(&self) -> Vec<ElementId> {
        self.active_links.iter().copied().collect()
    }

    pub fn is_link_active(&self, link: ElementId) -> bool {
        self.active_links.contains(&link)
    }

    /// Merged visual of an element (all `None` if never styled).
    pub fn visual(&self, element: ElementId) -> Visual {
        self.visuals.get(&element).copied().unwrap_or_default()
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    pub fn nav_background(&self) -> Option<Rgba> {
        self.nav_background
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.classes
            .get(&element)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn preloads(&self) -> &[(ElementId, String)] {
        &self.preloads
    }

    pub fn is_background_fit(&self, element: ElementId) -> bool {
        self.fitted.contains(&element)
    }
}

// =============================================================================
// RECORDING RENDERER
// =============================================================================

/// Renderer that records calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
    state: PageState,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Drain the call log. Page state is kept.
    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Scroll requests in call order.
    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                RenderOp::ScrollTo(request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    /// Calls that targeted `element`.
    pub fn ops_for(&self, element: ElementId) -> Vec<&RenderOp> {
        self.ops
            .iter()
            .filter(|op| op.element() == Some(element))
            .collect()
    }

    fn record(&mut self, op: RenderOp) {
        self.state.apply(&op);
        self.ops.push(op);
    }
}

impl Renderer for RecordingRenderer {
    fn set_link_active(&mut self, link: ElementId, active: bool) {
        self.record(RenderOp::LinkActive { link, active });
    }

    fn set_visual(&mut self, element: ElementId, visual: &Visual) {
        self.record(RenderOp::Visual {
            element,
            visual: *visual,
        });
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.record(RenderOp::Text {
            element,
            text: text.to_string(),
        });
    }

    fn set_nav_background(&mut self, nav: ElementId, color: Rgba) {
        self.record(RenderOp::NavBackground { nav, color });
    }

    fn set_class(&mut self, element: ElementId, class: &str, on: bool) {
        self.record(RenderOp::Class {
            element,
            class: class.to_string(),
            on,
        });
    }

    fn preload_background(&mut self, element: ElementId, url: &str) {
        self.record(RenderOp::PreloadBackground {
            element,
            url: url.to_string(),
        });
    }

    fn set_background_fit(&mut self, element: ElementId) {
        self.record(RenderOp::BackgroundFit { element });
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        self.record(RenderOp::ScrollTo(request));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScrollBehavior, Transform, Transition};
    use std::time::Duration;

    #[test]
    fn test_visual_merges_partial_updates() {
        let mut r = RecordingRenderer::new();
        let el = ElementId(1);
        r.set_visual(
            el,
            &Visual::hidden(20.0, Transition::OpacityTransform(Duration::from_millis(600))),
        );
        r.set_visual(el, &Visual::transform(Transform::TranslateY(5.0)));

        let visual = r.state().visual(el);
        assert_eq!(visual.opacity, Some(0.0));
        assert_eq!(visual.transform, Some(Transform::TranslateY(5.0)));
        assert!(visual.transition.is_some());
    }

    #[test]
    fn test_link_and_class_toggles() {
        let mut r = RecordingRenderer::new();
        r.set_link_active(ElementId(2), true);
        r.set_link_active(ElementId(3), true);
        r.set_link_active(ElementId(2), false);
        assert_eq!(r.state().active_links(), vec![ElementId(3)]);

        r.set_class(ElementId(4), "zoomed", true);
        assert!(r.state().has_class(ElementId(4), "zoomed"));
        r.set_class(ElementId(4), "zoomed", false);
        assert!(!r.state().has_class(ElementId(4), "zoomed"));
    }

    #[test]
    fn test_log_and_queries() {
        let mut r = RecordingRenderer::new();
        r.set_text(ElementId(0), "hi");
        r.scroll_to(ScrollRequest {
            top: 40.0,
            behavior: ScrollBehavior::Smooth,
        });
        r.set_text(ElementId(0), "hi there");

        assert_eq!(r.ops().len(), 3);
        assert_eq!(r.ops_for(ElementId(0)).len(), 2);
        assert_eq!(r.scroll_requests()[0].top, 40.0);
        assert_eq!(r.state().text(ElementId(0)), Some("hi there"));

        let drained = r.take_ops();
        assert_eq!(drained.len(), 3);
        assert!(r.ops().is_empty());
        assert_eq!(r.state().text(ElementId(0)), Some("hi there"));
    }
}
