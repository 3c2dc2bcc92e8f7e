//! Core types for spark-folio.
//!
//! These types describe the page as the behaviours see it: element handles,
//! geometry, role markers, and the visual state pushed to a renderer.

use std::fmt;
use std::time::Duration;

// =============================================================================
// Element handles
// =============================================================================

/// Handle to an element of the host document.
///
/// Handles are indices assigned when the document is built (pre-order).
/// They are only meaningful for the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned rectangle in CSS pixels.
///
/// Element rects are document-relative (y grows downwards from the top of
/// the page). The viewport is the same kind of rect, offset by the scroll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the rect by `margin` on every side (negative shrinks).
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: (self.width + margin * 2.0).max(0.0),
            height: (self.height + margin * 2.0).max(0.0),
        }
    }

    /// Intersection of two rects.
    ///
    /// Edge-adjacent rects produce a zero-area intersection rather than `None`,
    /// matching how browsers report touching elements as intersecting.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());

        if left > right || top > bottom {
            return None;
        }

        Some(Rect::new(left, top, right - left, bottom - top))
    }
}

/// Size of the visible area of the page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Document-relative rect of the viewport at a scroll offset.
    pub fn at_scroll(&self, offset: f32) -> Rect {
        Rect::new(0.0, offset, self.width, self.height)
    }
}

// =============================================================================
// Roles (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Role markers carried by document elements.
    ///
    /// These play the part of the class names / selectors the page is
    /// queried by. An element may carry several roles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Roles: u16 {
        /// Fixed navigation bar (its height compensates anchor scrolling).
        const NAV          = 1 << 0;
        /// Link inside the navigation bar.
        const NAV_LINK     = 1 << 1;
        /// Content section with an id.
        const SECTION      = 1 << 2;
        /// Hero block that receives the parallax offset.
        const HERO         = 1 << 3;
        /// Identity line inside the hero, typed out on load.
        const IDENTITY     = 1 << 4;
        const PROJECT_CARD = 1 << 5;
        const EVENT        = 1 << 6;
        const ROLE         = 1 << 7;
        const PHOTO_ITEM   = 1 << 8;
        const IMAGE        = 1 << 9;
        /// Element showing the current time.
        const CLOCK        = 1 << 10;
        /// Any link whose href is a fragment.
        const ANCHOR       = 1 << 11;

        /// Elements enrolled for the entrance animation.
        const REVEAL = Self::PROJECT_CARD.bits()
            | Self::EVENT.bits()
            | Self::ROLE.bits()
            | Self::PHOTO_ITEM.bits();
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGB color with fractional alpha, rendered as CSS `rgba(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black(a: f32) -> Self {
        Self::new(0, 0, 0, a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// =============================================================================
// Visual state
// =============================================================================

/// Transform applied to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Cleared transform (renders as an empty style value).
    None,
    /// Vertical translation in pixels.
    TranslateY(f32),
    /// 3D tilt used by project cards under the pointer.
    Tilt {
        perspective: f32,
        rotate_x: f32,
        rotate_y: f32,
        lift: f32,
    },
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::None => Ok(()),
            Transform::TranslateY(y) => write!(f, "translateY({y}px)"),
            Transform::Tilt {
                perspective,
                rotate_x,
                rotate_y,
                lift,
            } => write!(
                f,
                "perspective({perspective}px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) translateY({}px)",
                -lift
            ),
        }
    }
}

/// CSS transition attached to a visual change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `opacity <d> ease, transform <d> ease`
    OpacityTransform(Duration),
    /// `opacity <d> ease`
    Opacity(Duration),
    /// `all <d> ease`
    All(Duration),
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::OpacityTransform(d) => {
                let s = d.as_secs_f32();
                write!(f, "opacity {s}s ease, transform {s}s ease")
            }
            Transition::Opacity(d) => write!(f, "opacity {}s ease", d.as_secs_f32()),
            Transition::All(d) => write!(f, "all {}s ease", d.as_secs_f32()),
        }
    }
}

/// Partial style update for one element.
///
/// `None` fields are left untouched by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Visual {
    pub opacity: Option<f32>,
    pub transform: Option<Transform>,
    pub transition: Option<Transition>,
}

impl Visual {
    /// Pre-reveal state: invisible and pushed down by `offset` pixels.
    pub fn hidden(offset: f32, transition: Transition) -> Self {
        Self {
            opacity: Some(0.0),
            transform: Some(Transform::TranslateY(offset)),
            transition: Some(transition),
        }
    }

    /// Final reveal state: fully visible at its layout position.
    pub fn revealed() -> Self {
        Self {
            opacity: Some(1.0),
            transform: Some(Transform::TranslateY(0.0)),
            transition: None,
        }
    }

    pub fn transform(transform: Transform) -> Self {
        Self {
            transform: Some(transform),
            ..Default::default()
        }
    }

    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Default::default()
        }
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }
}

// =============================================================================
// Lifecycles
// =============================================================================

/// Lifecycle of a reveal target. `Revealed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    #[default]
    Pending,
    Revealed,
}

/// Lifecycle of the typed-text target. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingPhase {
    #[default]
    Idle,
    Typing,
    Done,
}

// =============================================================================
// Scrolling
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Request for the host to move the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f32,
    pub behavior: ScrollBehavior,
}

// =============================================================================
// Tests
// =============================================================================
