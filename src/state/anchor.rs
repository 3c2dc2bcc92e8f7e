//! Anchor Navigation - Smooth scrolling to fragment targets
//!
//! Clicking `#id` scrolls so the target sits just below the fixed nav bar.
//! Targets are resolved once from the document snapshot; an unknown target
//! is skipped.

use std::collections::HashMap;

use tracing::debug;

use crate::document::Document;
use crate::types::{ScrollBehavior, ScrollRequest};

/// Scroll offset that puts `target_top` just below the nav bar.
pub fn scroll_target(target_top: f32, nav_height: f32, gap: f32) -> f32 {
    (target_top - nav_height - gap).max(0.0)
}

/// Resolves fragment clicks to scroll requests.
#[derive(Debug, Clone, Default)]
pub struct AnchorNavigator {
    targets: HashMap<String, f32>,
    nav_height: f32,
    gap: f32,
}

impl AnchorNavigator {
    /// Build from the document. Without a nav bar no height is compensated.
    pub fn from_document(document: &Document, gap: f32) -> Self {
        let targets = document
            .iter()
            .filter_map(|(_, el)| el.anchor.clone().map(|id| (id, el.rect.top())))
            .fold(HashMap::new(), |mut map, (id, top)| {
                // First element with an id wins, like a document lookup.
                map.entry(id).or_insert(top);
                map
            });

        Self {
            targets,
            nav_height: document.nav_height().unwrap_or(0.0),
            gap,
        }
    }

    /// Scroll request for a click on `href`, if it points at a known target.
    pub fn handle(&self, href: &str) -> Option<ScrollRequest> {
        let anchor = href.strip_prefix('#')?;
        let Some(&top) = self.targets.get(anchor) else {
            debug!(href, "anchor target not found, skipped");
            return None;
        };

        Some(ScrollRequest {
            top: scroll_target(top, self.nav_height, self.gap),
            behavior: ScrollBehavior::Smooth,
        })
    }

    pub fn nav_height(&self) -> f32 {
        self.nav_height
    }
}
