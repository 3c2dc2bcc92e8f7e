//! Images - Lazy fade-in and event card backgrounds
//!
//! # Fade-in
//!
//! When enabled, each image is hidden (opacity 0) the first time it enters
//! the viewport and shown once the host reports it loaded. Observation ends
//! after that first intersection.
//!
//! # Event backgrounds
//!
//! Event cards carry an inline `url("...")` background. The host is asked to
//! preload it; when it reports the load, the background is fitted.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::pipeline::events::{IntersectionEvent, Subscription, VisibilitySource};
use crate::types::{ElementId, Transition, Visual};

// =============================================================================
// FADE-IN
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadeState {
    Waiting(Subscription),
    Loading,
    Shown,
}

/// Fade-in state for observed images.
#[derive(Debug, Default)]
pub struct ImageFader {
    images: HashMap<ElementId, FadeState>,
    duration: Duration,
}

impl ImageFader {
    pub fn enroll(
        images: impl IntoIterator<Item = ElementId>,
        duration: Duration,
        source: &mut dyn VisibilitySource,
    ) -> Self {
        let mut fader = Self {
            images: HashMap::new(),
            duration,
        };
        for image in images {
            fader
                .images
                .entry(image)
                .or_insert_with(|| FadeState::Waiting(source.observe(image, 0.0)));
        }
        fader
    }

    /// First intersection hides the image and stops observing it.
    pub fn handle_intersection(
        &mut self,
        event: &IntersectionEvent,
        source: &mut dyn VisibilitySource,
    ) -> Option<Visual> {
        if !event.is_intersecting {
            return None;
        }
        let state = self.images.get_mut(&event.target)?;
        let FadeState::Waiting(subscription) = *state else {
            return None;
        };

        source.unobserve(subscription);
        *state = FadeState::Loading;
        Some(Visual::opacity(0.0).with_transition(Transition::Opacity(self.duration)))
    }

    /// Load completion shows an image that is waiting for it.
    pub fn handle_loaded(&mut self, target: ElementId) -> Option<Visual> {
        let state = self.images.get_mut(&target)?;
        if *state != FadeState::Loading {
            return None;
        }
        *state = FadeState::Shown;
        Some(Visual::opacity(1.0))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

// =============================================================================
// EVENT BACKGROUNDS
// =============================================================================

/// URL inside a CSS `url(...)` value, with optional quotes.
pub fn background_url(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix("url(")?.strip_suffix(')')?.trim();
    let unquoted = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(inner);

    (!unquoted.is_empty()).then_some(unquoted)
}

/// Background preloads awaiting completion.
#[derive(Debug, Clone, Default)]
pub struct EventBackdrops {
    pending: HashMap<ElementId, String>,
}

impl EventBackdrops {
    /// Collect cards with a parsable background. Others are skipped.
    pub fn new<'a>(cards: impl IntoIterator<Item = (ElementId, Option<&'a str>)>) -> Self {
        let pending = cards
            .into_iter()
            .filter_map(|(id, bg)| Some((id, background_url(bg?)?.to_string())))
            .collect();
        Self { pending }
    }

    /// Preloads the host should start, sorted by element.
    pub fn requests(&self) -> Vec<(ElementId, String)> {
        let mut requests: Vec<_> = self
            .pending
            .iter()
            .map(|(id, url)| (*id, url.clone()))
            .collect();
        requests.sort_by_key(|(id, _)| *id);
        requests
    }

    /// Returns true if `target` was waiting on its background.
    pub fn handle_loaded(&mut self, target: ElementId) -> bool {
        match self.pending.remove(&target) {
            Some(url) => {
                debug!(element = %target, url, "event background loaded");
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
