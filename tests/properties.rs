//! Property tests for section highlighting, reveal and typing.

use std::time::Duration;

use proptest::prelude::*;
use spark_folio::state::link_is_active;
use spark_folio::{
    activation_window, compute_active_link, ElementId, IntersectionEvent, NavLink, PageConfig,
    RevealAnimator, RevealOptions, RevealPhase, Section, Subscription, TimerQueue, TimerTask,
    TypedText, VisibilitySource,
};
use unicode_segmentation::UnicodeSegmentation;

const OFFSET: f32 = 100.0;

/// Contiguous sections starting at `start`, one per height.
fn stack(start: f32, heights: &[f32]) -> Vec<Section> {
    let mut top = start;
    heights
        .iter()
        .enumerate()
        .map(|(i, &h)| {
            let section = Section::new(format!("s{i}"), top, h);
            top += h;
            section
        })
        .collect()
}

#[derive(Default)]
struct NullSource {
    live: usize,
    next: u64,
}

impl VisibilitySource for NullSource {
    fn observe(&mut self, _target: ElementId, _threshold: f32) -> Subscription {
        self.live += 1;
        self.next += 1;
        Subscription(self.next)
    }

    fn unobserve(&mut self, _subscription: Subscription) {
        self.live -= 1;
    }
}

proptest! {
    #[test]
    fn outside_every_window_nothing_is_active(
        heights in prop::collection::vec(10.0f32..1000.0, 1..8),
        start in 0.0f32..2000.0,
        before in 0.01f32..500.0,
        after in 0.0f32..500.0,
    ) {
        let sections = stack(start, &heights);
        let first = activation_window(&sections[0], OFFSET).start;
        let end = sections
            .iter()
            .map(|s| activation_window(s, OFFSET).end)
            .fold(f32::MIN, f32::max);

        prop_assert_eq!(compute_active_link(first - before, &sections, OFFSET), None);
        prop_assert_eq!(compute_active_link(end + after, &sections, OFFSET), None);
    }

    #[test]
    fn inside_one_window_that_section_is_active(
        heights in prop::collection::vec(10.0f32..1000.0, 1..8),
        pick in any::<prop::sample::Index>(),
        fraction in 0.0f32..0.99,
    ) {
        let sections = stack(0.0, &heights);
        let i = pick.index(sections.len());
        let offset = sections[i].top - OFFSET + sections[i].height * fraction;
        let expected = format!("s{i}");

        prop_assert_eq!(compute_active_link(offset, &sections, OFFSET), Some(expected.as_str()));

        // Exactly the matching link is active
        let links: Vec<NavLink> = (0..sections.len())
            .map(|j| NavLink::new(ElementId(j), format!("#s{j}")))
            .collect();
        let active = compute_active_link(offset, &sections, OFFSET);
        let lit: Vec<usize> = links
            .iter()
            .enumerate()
            .filter(|(_, l)| link_is_active(l, active))
            .map(|(j, _)| j)
            .collect();
        prop_assert_eq!(lit, vec![i]);
    }

    #[test]
    fn overlapping_windows_last_wins(
        top in 0.0f32..1000.0,
        height in 50.0f32..500.0,
        count in 2usize..6,
        fraction in 0.0f32..0.99,
    ) {
        let sections: Vec<Section> = (0..count)
            .map(|i| Section::new(format!("s{i}"), top, height))
            .collect();
        let offset = top - OFFSET + height * fraction;
        let expected = format!("s{}", count - 1);

        prop_assert_eq!(compute_active_link(offset, &sections, OFFSET), Some(expected.as_str()));
    }

    #[test]
    fn reveal_happens_at_most_once(
        ratios in prop::collection::vec(0.0f32..=1.0, 1..30),
    ) {
        let mut source = NullSource::default();
        let target = ElementId(1);
        let mut animator = RevealAnimator::enroll([target], RevealOptions::default(), &mut source);

        let mut reveals = 0;
        for ratio in &ratios {
            if animator.handle(&IntersectionEvent::visible(target, *ratio), &mut source) {
                reveals += 1;
            }
        }

        prop_assert!(reveals <= 1);
        let expected = ratios.iter().any(|r| *r > 0.0 && *r >= 0.1);
        prop_assert_eq!(reveals == 1, expected);
        prop_assert_eq!(source.live, if expected { 0 } else { 1 });
    }

    #[test]
    fn never_intersecting_stays_pending(events in 0usize..20) {
        let mut source = NullSource::default();
        let target = ElementId(7);
        let mut animator = RevealAnimator::enroll([target], RevealOptions::default(), &mut source);

        for _ in 0..events {
            animator.handle(&IntersectionEvent::hidden(target), &mut source);
        }
        prop_assert_eq!(animator.phase(target), Some(RevealPhase::Pending));
    }

    #[test]
    fn typed_prefix_follows_tick_count(text in "\\PC{1,24}", ticks in 0usize..30) {
        let config = PageConfig::default();
        let mut timers = TimerQueue::new();
        let mut typed = TypedText::new(ElementId(0), text.clone());
        typed.start(&mut timers, &config);

        let graphemes: Vec<&str> = text.graphemes(true).collect();
        let k = ticks.min(graphemes.len());

        // Tick k lands at delay + (k - 1) * interval
        let until = if k == 0 {
            config.typing_delay - Duration::from_millis(1)
        } else {
            config.typing_delay + config.typing_interval * (k as u32 - 1)
        };
        while let Some(task) = timers.pop_due(until) {
            prop_assert_eq!(task, TimerTask::TypeNextChar);
            typed.handle_tick(&mut timers);
        }

        prop_assert_eq!(typed.displayed(), graphemes[..k].concat());
        prop_assert_eq!(typed.cursor(), k);
        prop_assert_eq!(typed.displayed() == text, k == graphemes.len());
    }
}
