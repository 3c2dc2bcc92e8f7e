//! Page Layout - Taffy bridge for page outlines
//!
//! Converts a tree of [`Block`]s into Taffy styles, runs flexbox layout, and
//! extracts absolute, document-relative rects into a [`Document`].
//!
//! Blocks are laid out in a column by default. A block marked `fixed` is
//! absolutely positioned at the top of the page and takes no space in the
//! flow, which is how the navigation bar behaves.

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    LengthPercentage, LengthPercentageAuto, NodeId, Position as TaffyPosition, Rect as TaffyRect,
    Size, Style, TaffyTree,
};
use tracing::debug;

use crate::document::{Document, Element};
use crate::error::Result;
use crate::types::{Rect, Roles};

// =============================================================================
// BLOCK
// =============================================================================

/// Main axis of a block's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

/// One node of a page outline.
///
/// `height` is a minimum: a block grows to fit its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub roles: Roles,
    pub anchor: Option<String>,
    pub href: Option<String>,
    pub text: String,
    pub background: Option<String>,
    pub height: f32,
    pub width: Option<f32>,
    pub direction: Direction,
    pub padding: f32,
    pub gap: f32,
    pub fixed: bool,
    pub children: Vec<Block>,
}

impl Block {
    pub fn new(roles: Roles, height: f32) -> Self {
        Self {
            roles,
            height,
            ..Default::default()
        }
    }

    /// Fixed navigation bar laid out as a row.
    pub fn nav(height: f32) -> Self {
        Self {
            roles: Roles::NAV,
            height,
            direction: Direction::Row,
            fixed: true,
            ..Default::default()
        }
    }

    /// Nav link pointing at `#target`.
    pub fn nav_link(target: &str, width: f32) -> Self {
        Self {
            roles: Roles::NAV_LINK | Roles::ANCHOR,
            href: Some(format!("#{target}")),
            text: target.to_string(),
            width: Some(width),
            ..Default::default()
        }
    }

    /// Section with an id.
    pub fn section(id: impl Into<String>, height: f32) -> Self {
        Self {
            roles: Roles::SECTION,
            anchor: Some(id.into()),
            height,
            ..Default::default()
        }
    }

    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn child(mut self, child: Block) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Block>) -> Self {
        self.children.extend(children);
        self
    }

    fn to_element(&self, rect: Rect) -> Element {
        Element {
            roles: self.roles,
            rect,
            anchor: self.anchor.clone(),
            href: self.href.clone(),
            text: self.text.clone(),
            background: self.background.clone(),
        }
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn to_taffy_flex_direction(dir: Direction) -> TaffyFlexDirection {
    match dir {
        Direction::Column => TaffyFlexDirection::Column,
        Direction::Row => TaffyFlexDirection::Row,
    }
}

/// Build a Taffy Style from a Block.
fn build_style(block: &Block) -> Style {
    let mut style = Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(block.direction),
        flex_shrink: 0.0,

        size: Size {
            width: block
                .width
                .map(TaffyDimension::Length)
                .unwrap_or(TaffyDimension::Auto),
            height: TaffyDimension::Auto,
        },
        min_size: Size {
            width: TaffyDimension::Auto,
            height: TaffyDimension::Length(block.height.max(0.0)),
        },

        padding: TaffyRect {
            top: LengthPercentage::Length(block.padding),
            right: LengthPercentage::Length(block.padding),
            bottom: LengthPercentage::Length(block.padding),
            left: LengthPercentage::Length(block.padding),
        },

        gap: Size {
            width: LengthPercentage::Length(block.gap),
            height: LengthPercentage::Length(block.gap),
        },

        ..Default::default()
    };

    if block.fixed {
        style.position = TaffyPosition::Absolute;
        style.inset = TaffyRect {
            top: LengthPercentageAuto::Length(0.0),
            left: LengthPercentageAuto::Length(0.0),
            right: LengthPercentageAuto::Auto,
            bottom: LengthPercentageAuto::Auto,
        };
        style.size.width = TaffyDimension::Percent(1.0);
    }

    style
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Flattened node: Taffy id, parent position in the flat list, source block.
struct FlatNode<'a> {
    node: NodeId,
    parent: Option<usize>,
    block: &'a Block,
}

fn push_block<'a>(
    tree: &mut TaffyTree<()>,
    flat: &mut Vec<FlatNode<'a>>,
    block: &'a Block,
    parent: Option<usize>,
) -> Result<NodeId> {
    let node = tree.new_leaf(build_style(block))?;
    let index = flat.len();
    flat.push(FlatNode {
        node,
        parent,
        block,
    });

    for child in &block.children {
        let child_node = push_block(tree, flat, child, Some(index))?;
        tree.add_child(node, child_node)?;
    }

    Ok(node)
}

/// Lay out a page outline at the given viewport width.
///
/// Element ids in the returned document follow pre-order over `blocks`.
pub fn layout_page(blocks: &[Block], viewport_width: f32) -> Result<Document> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let mut flat: Vec<FlatNode<'_>> = Vec::new();

    let mut roots = Vec::with_capacity(blocks.len());
    for block in blocks {
        roots.push(push_block(&mut tree, &mut flat, block, None)?);
    }

    let page = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: TaffyFlexDirection::Column,
            size: Size {
                width: TaffyDimension::Length(viewport_width),
                height: TaffyDimension::Auto,
            },
            ..Default::default()
        },
        &roots,
    )?;

    tree.compute_layout(
        page,
        Size {
            width: AvailableSpace::Definite(viewport_width),
            height: AvailableSpace::MaxContent,
        },
    )?;

    // Parents precede children, so absolute positions accumulate in one pass.
    let mut rects: Vec<Rect> = Vec::with_capacity(flat.len());
    for item in &flat {
        let layout = tree.layout(item.node)?;
        let (ox, oy) = item
            .parent
            .map(|p| (rects[p].x, rects[p].y))
            .unwrap_or((0.0, 0.0));
        rects.push(Rect::new(
            ox + layout.location.x,
            oy + layout.location.y,
            layout.size.width,
            layout.size.height,
        ));
    }

    let page_height = tree.layout(page)?.size.height;
    debug!(elements = flat.len(), page_height, "page laid out");

    Ok(flat
        .iter()
        .zip(rects)
        .map(|(item, rect)| item.block.to_element(rect))
        .collect())
}

// =============================================================================
// TESTS
// =============================================================================
