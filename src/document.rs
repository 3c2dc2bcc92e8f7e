//! Document - The host page as the behaviours see it.
//!
//! A `Document` is a flat, pre-order list of elements with role markers,
//! document-relative rects and the few attributes the behaviours read
//! (text, `id`, `href`, background image). It is a snapshot: geometry is
//! taken once and never re-measured.
//!
//! Every lookup returns `Option`/empty iterators. Callers skip the dependent
//! behaviour when an element is absent.

use crate::types::{ElementId, Rect, Roles};

// =============================================================================
// ELEMENT
// =============================================================================

/// One element of the host document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub roles: Roles,
    pub rect: Rect,
    /// The element's `id` attribute (anchor target).
    pub anchor: Option<String>,
    /// Link target for anchors, e.g. `#about`.
    pub href: Option<String>,
    /// Text content.
    pub text: String,
    /// Inline `background-image` value, e.g. `url("talk.jpg")`.
    pub background: Option<String>,
}

impl Element {
    pub fn new(roles: Roles, rect: Rect) -> Self {
        Self {
            roles,
            rect,
            ..Default::default()
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }
}

// =============================================================================
// SECTION / NAV LINK HANDLES
// =============================================================================

/// A content region with a stable id and vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// A navigation link bound to a section through its fragment href.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLink {
    pub element: ElementId,
    pub href: String,
}

impl NavLink {
    pub fn new(element: ElementId, href: impl Into<String>) -> Self {
        Self {
            element,
            href: href.into(),
        }
    }

    /// Section id this link points at. `None` for non-fragment hrefs.
    pub fn target(&self) -> Option<&str> {
        self.href.strip_prefix('#')
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Snapshot of the host page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// All elements in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, el)| (ElementId(i), el))
    }

    /// Elements carrying any of `roles`, in document order.
    pub fn with_roles(&self, roles: Roles) -> impl Iterator<Item = (ElementId, &Element)> {
        self.iter().filter(move |(_, el)| el.roles.intersects(roles))
    }

    /// First element carrying any of `roles`.
    pub fn first(&self, roles: Roles) -> Option<(ElementId, &Element)> {
        self.with_roles(roles).next()
    }

    /// Element whose `id` attribute equals `anchor`.
    pub fn by_anchor(&self, anchor: &str) -> Option<(ElementId, &Element)> {
        self.iter()
            .find(|(_, el)| el.anchor.as_deref() == Some(anchor))
    }

    /// Resolve an href like `#about` to its target element.
    pub fn resolve_href(&self, href: &str) -> Option<(ElementId, &Element)> {
        let anchor = href.strip_prefix('#')?;
        if anchor.is_empty() {
            return None;
        }
        self.by_anchor(anchor)
    }

    /// Rendered height of the navigation bar, if there is one.
    pub fn nav_height(&self) -> Option<f32> {
        self.first(Roles::NAV).map(|(_, el)| el.rect.height)
    }

    /// Sections that carry an id, in document order.
    pub fn sections(&self) -> Vec<Section> {
        self.with_roles(Roles::SECTION)
            .filter_map(|(_, el)| {
                let id = el.anchor.as_deref()?;
                Some(Section::new(id, el.rect.top(), el.rect.height))
            })
            .collect()
    }

    /// Navigation links with an href, in document order.
    pub fn nav_links(&self) -> Vec<NavLink> {
        self.with_roles(Roles::NAV_LINK)
            .filter_map(|(id, el)| el.href.as_deref().map(|href| NavLink::new(id, href)))
            .collect()
    }
}

impl FromIterator<Element> for Document {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
