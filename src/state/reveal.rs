//! Reveal Animator - One-shot entrance animations
//!
//! Enrolled elements start hidden (transparent, pushed down) and are
//! revealed the first time enough of them is visible. Revealing is
//! terminal: the observation is torn down through the visibility source,
//! so scrolling the element out and back in does nothing.
//!
//! # Lifecycle
//!
//! ```text
//! enroll → Pending ──(visible ≥ threshold)──→ Revealed (unobserved)
//! ```

use std::collections::HashMap;
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::config::PageConfig;
use crate::pipeline::events::{IntersectionEvent, Subscription, VisibilitySource};
use crate::types::{ElementId, RevealPhase, Transition, Visual};

// =============================================================================
// PURE FUNCTIONS
// =============================================================================

/// Whether a visible fraction is enough to reveal.
pub fn should_reveal(visible_fraction: f32, threshold: f32) -> bool {
    visible_fraction > 0.0 && visible_fraction >= threshold
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Enrollment options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the target that must be visible.
    pub threshold: f32,
    /// Margin around the viewport. Informational here; the visibility
    /// source applies it.
    pub root_margin: f32,
    /// Vertical offset of the hidden state (px).
    pub offset: f32,
    pub duration: Duration,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self::from(&PageConfig::default())
    }
}

impl From<&PageConfig> for RevealOptions {
    fn from(config: &PageConfig) -> Self {
        Self {
            threshold: config.reveal_threshold,
            root_margin: config.root_margin,
            offset: config.reveal_offset,
            duration: config.reveal_duration,
        }
    }
}

// =============================================================================
// ANIMATOR
// =============================================================================

struct RevealTarget {
    element: ElementId,
    phase: Signal<RevealPhase>,
    subscription: Option<Subscription>,
}

/// Drives the reveal lifecycle of a set of elements.
pub struct RevealAnimator {
    options: RevealOptions,
    targets: Vec<RevealTarget>,
    index: HashMap<ElementId, usize>,
}

impl RevealAnimator {
    /// Enroll `targets` and start observing each through `source`.
    ///
    /// Duplicate elements are enrolled once.
    pub fn enroll(
        targets: impl IntoIterator<Item = ElementId>,
        options: RevealOptions,
        source: &mut dyn VisibilitySource,
    ) -> Self {
        let mut animator = Self {
            options,
            targets: Vec::new(),
            index: HashMap::new(),
        };

        for element in targets {
            if animator.index.contains_key(&element) {
                continue;
            }
            let subscription = source.observe(element, options.threshold);
            animator.index.insert(element, animator.targets.len());
            animator.targets.push(RevealTarget {
                element,
                phase: signal(RevealPhase::Pending),
                subscription: Some(subscription),
            });
        }

        debug!(count = animator.targets.len(), "reveal targets enrolled");
        animator
    }

    /// React to a visibility notification.
    ///
    /// Returns true if the target was revealed by this call.
    pub fn handle(&mut self, event: &IntersectionEvent, source: &mut dyn VisibilitySource) -> bool {
        let Some(&i) = self.index.get(&event.target) else {
            return false;
        };
        let target = &mut self.targets[i];

        if target.phase.get() == RevealPhase::Revealed {
            return false;
        }
        if !event.is_intersecting || !should_reveal(event.ratio, self.options.threshold) {
            return false;
        }

        if let Some(subscription) = target.subscription.take() {
            source.unobserve(subscription);
        }
        target.phase.set(RevealPhase::Revealed);
        debug!(element = %target.element, ratio = event.ratio, "revealed");
        true
    }

    pub fn phase(&self, element: ElementId) -> Option<RevealPhase> {
        self.index.get(&element).map(|&i| self.targets[i].phase.get())
    }

    pub fn phase_signal(&self, element: ElementId) -> Option<Signal<RevealPhase>> {
        self.index
            .get(&element)
            .map(|&i| self.targets[i].phase.clone())
    }

    /// Enrolled elements in enrollment order.
    pub fn targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.targets.iter().map(|t| t.element)
    }

    pub fn pending_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.phase.get() == RevealPhase::Pending)
            .count()
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Visual applied before any observation fires.
    pub fn hidden_visual(&self) -> Visual {
        Visual::hidden(
            self.options.offset,
            Transition::OpacityTransform(self.options.duration),
        )
    }

    /// Visual applied on reveal.
    pub fn revealed_visual(&self) -> Visual {
        Visual::revealed()
    }
}

// =============================================================================
// TESTS
// =============================================================================
