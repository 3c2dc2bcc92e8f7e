//! Typed Text - Character-by-character reveal of the identity line
//!
//! The original text is captured once and the element is cleared. After the
//! start delay one grapheme cluster is appended per tick until the string is
//! whole again. Typing starts unconditionally at mount and runs to
//! completion; only unmount (clearing the timers) stops it.
//!
//! # Timing
//!
//! For a text of `N` graphemes the `k`-th grapheme appears at
//! `delay + (k - 1) * interval`, so the text is complete at
//! `delay + (N - 1) * interval`.

use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::PageConfig;
use crate::pipeline::timers::{TimerId, TimerQueue, TimerTask};
use crate::types::{ElementId, TypingPhase};

/// Typing state for the designated identity element.
pub struct TypedText {
    element: ElementId,
    original: String,
    /// Byte offset of the end of each grapheme.
    boundaries: Vec<usize>,
    cursor: usize,
    interval: Duration,
    /// When the next grapheme is due; ticks before it are ignored.
    due: Duration,
    timer: Option<TimerId>,
    displayed: Signal<String>,
    phase: Signal<TypingPhase>,
}

impl TypedText {
    /// Capture the element's text. Nothing is cleared until `start`.
    pub fn new(element: ElementId, text: impl Into<String>) -> Self {
        let original = text.into();
        let boundaries = original
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();

        Self {
            element,
            displayed: signal(original.clone()),
            original,
            boundaries,
            cursor: 0,
            interval: Duration::ZERO,
            due: Duration::ZERO,
            timer: None,
            phase: signal(TypingPhase::Idle),
        }
    }

    /// Clear the element and schedule the first character.
    ///
    /// Calling `start` twice has no effect.
    pub fn start(&mut self, timers: &mut TimerQueue, config: &PageConfig) {
        if self.phase.get() != TypingPhase::Idle {
            return;
        }

        self.interval = config.typing_interval;
        self.displayed.set(String::new());

        if self.boundaries.is_empty() {
            self.phase.set(TypingPhase::Done);
            return;
        }

        self.phase.set(TypingPhase::Typing);
        self.schedule(timers, config.typing_delay);
        debug!(element = %self.element, len = self.boundaries.len(), "typing scheduled");
    }

    /// Append the next grapheme. Returns true if one was appended.
    ///
    /// A tick arriving before the next grapheme is due is ignored, so only
    /// one chain of timeouts ever drives the text.
    pub fn handle_tick(&mut self, timers: &mut TimerQueue) -> bool {
        if self.phase.get() != TypingPhase::Typing {
            return false;
        }
        if timers.now() < self.due {
            trace!(element = %self.element, "early typing tick ignored");
            return false;
        }
        if let Some(id) = self.timer.take() {
            timers.clear(id);
        }

        self.cursor += 1;
        let end = self.boundaries[self.cursor - 1];
        self.displayed.set(self.original[..end].to_string());

        if self.cursor == self.boundaries.len() {
            self.phase.set(TypingPhase::Done);
            debug!(element = %self.element, "typing done");
        } else {
            self.schedule(timers, self.interval);
        }
        true
    }

    fn schedule(&mut self, timers: &mut TimerQueue, delay: Duration) {
        self.due = timers.now() + delay;
        self.timer = Some(timers.set_timeout(delay, TimerTask::TypeNextChar));
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Text currently shown.
    pub fn displayed(&self) -> String {
        self.displayed.get()
    }

    pub fn displayed_signal(&self) -> Signal<String> {
        self.displayed.clone()
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase.get()
    }

    /// Graphemes typed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the captured text in graphemes.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    pub fn original(&self) -> &str {
        &self.original
    }
}

// =============================================================================
// TESTS
// =============================================================================
