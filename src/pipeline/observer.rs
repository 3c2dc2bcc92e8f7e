//! Viewport Observer - Geometry-backed visibility source
//!
//! Emulates an intersection observer on top of the document snapshot:
//! every observation remembers the last state it reported and a new
//! notification is queued only when that state changes.
//!
//! State per observation is `(is_intersecting, ratio >= threshold)`.
//! The first check after `observe` always reports, so hosts learn the
//! initial visibility of everything they watch.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::document::Document;
use crate::types::{ElementId, Rect, Viewport};

use super::events::{IntersectionEvent, Subscription, VisibilitySource};

// =============================================================================
// RATIO
// =============================================================================

/// Visible fraction of `target` inside `root`.
///
/// Returns `None` when the rects do not touch. Zero-area targets that touch
/// the root count as fully visible.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> Option<f32> {
    let hit = target.intersection(root)?;
    let area = target.area();
    if area == 0.0 {
        return Some(1.0);
    }
    Some((hit.area() / area).clamp(0.0, 1.0))
}

// =============================================================================
// OBSERVER
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Observation {
    target: ElementId,
    threshold: f32,
    last: Option<(bool, bool)>,
}

/// Intersection observer over a document snapshot.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    rects: HashMap<ElementId, Rect>,
    viewport: Viewport,
    scroll: f32,
    root_margin: f32,
    next_id: u64,
    observations: BTreeMap<Subscription, Observation>,
}

impl ViewportObserver {
    pub fn new(document: &Document, viewport: Viewport, root_margin: f32) -> Self {
        Self {
            rects: document.iter().map(|(id, el)| (id, el.rect)).collect(),
            viewport,
            scroll: 0.0,
            root_margin,
            next_id: 0,
            observations: BTreeMap::new(),
        }
    }

    /// Number of live observations.
    pub fn observed_count(&self) -> usize {
        self.observations.len()
    }

    pub fn is_observing(&self, target: ElementId) -> bool {
        self.observations.values().any(|o| o.target == target)
    }

    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll = offset.max(0.0);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Document-relative root rect, including the margin.
    pub fn root(&self) -> Rect {
        self.viewport.at_scroll(self.scroll).expand(self.root_margin)
    }

    /// Check every observation and collect the ones whose state changed.
    ///
    /// Targets missing from the snapshot never report.
    pub fn take_records(&mut self) -> Vec<IntersectionEvent> {
        let root = self.root();
        let mut records = Vec::new();

        for observation in self.observations.values_mut() {
            let Some(rect) = self.rects.get(&observation.target) else {
                continue;
            };

            let ratio = intersection_ratio(rect, &root);
            let is_intersecting = ratio.is_some();
            let ratio = ratio.unwrap_or(0.0);
            let state = (is_intersecting, is_intersecting && ratio >= observation.threshold);

            if observation.last == Some(state) {
                continue;
            }
            observation.last = Some(state);

            records.push(IntersectionEvent {
                target: observation.target,
                ratio,
                is_intersecting,
            });
        }

        if !records.is_empty() {
            trace!(count = records.len(), scroll = self.scroll, "intersection records");
        }

        records
    }
}

impl VisibilitySource for ViewportObserver {
    fn observe(&mut self, target: ElementId, threshold: f32) -> Subscription {
        self.next_id += 1;
        let subscription = Subscription(self.next_id);
        self.observations.insert(
            subscription,
            Observation {
                target,
                threshold,
                last: None,
            },
        );
        subscription
    }

    fn unobserve(&mut self, subscription: Subscription) {
        self.observations.remove(&subscription);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;
    use crate::types::Roles;

    fn setup() -> ViewportObserver {
        // 0: in first screen, 1: far below, 2: zero height
        let doc = Document::new(vec![
            Element::new(Roles::PROJECT_CARD, Rect::new(0.0, 100.0, 400.0, 200.0)),
            Element::new(Roles::PROJECT_CARD, Rect::new(0.0, 2000.0, 400.0, 200.0)),
            Element::new(Roles::IMAGE, Rect::new(0.0, 1500.0, 400.0, 0.0)),
        ]);
        ViewportObserver::new(&doc, Viewport::new(800.0, 600.0), 0.0)
    }

    #[test]
    fn test_ratio() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 50.0, 100.0, 100.0), &root), Some(0.5));
        assert_eq!(intersection_ratio(&Rect::new(0.0, 10.0, 100.0, 20.0), &root), Some(1.0));
        assert_eq!(intersection_ratio(&Rect::new(0.0, 500.0, 10.0, 10.0), &root), None);
        assert_eq!(intersection_ratio(&Rect::new(0.0, 40.0, 10.0, 0.0), &root), Some(1.0));
    }

    #[test]
    fn test_initial_records_report_everything() {
        let mut observer = setup();
        observer.observe(ElementId(0), 0.1);
        observer.observe(ElementId(1), 0.1);

        let records = observer.take_records();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_intersecting);
        assert_eq!(records[0].ratio, 1.0);
        assert!(!records[1].is_intersecting);

        // Nothing changed, nothing reported
        assert!(observer.take_records().is_empty());
    }

    #[test]
    fn test_threshold_crossing_reports() {
        let mut observer = setup();
        observer.observe(ElementId(1), 0.5);
        observer.take_records();

        // 2000..2200 vs viewport 1450..2050 → 50px of 200 visible
        observer.set_scroll(1450.0);
        let records = observer.take_records();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_intersecting);
        assert!((records[0].ratio - 0.25).abs() < 1e-4);

        // Still below threshold, same state → silent
        observer.set_scroll(1460.0);
        assert!(observer.take_records().is_empty());

        // Crosses 0.5
        observer.set_scroll(1600.0);
        let records = observer.take_records();
        assert_eq!(records.len(), 1);
        assert!(records[0].ratio >= 0.5);
    }

    #[test]
    fn test_unobserve_stops_notifications() {
        let mut observer = setup();
        let sub = observer.observe(ElementId(1), 0.1);
        observer.take_records();
        assert_eq!(observer.observed_count(), 1);

        observer.unobserve(sub);
        assert_eq!(observer.observed_count(), 0);
        assert!(!observer.is_observing(ElementId(1)));

        observer.set_scroll(1900.0);
        assert!(observer.take_records().is_empty());
    }

    #[test]
    fn test_root_margin_expands_viewport() {
        let doc = Document::new(vec![Element::new(
            Roles::EVENT,
            Rect::new(0.0, 650.0, 100.0, 100.0),
        )]);
        let mut observer = ViewportObserver::new(&doc, Viewport::new(800.0, 600.0), 100.0);
        observer.observe(ElementId(0), 0.0);

        let records = observer.take_records();
        assert!(records[0].is_intersecting);
    }

    #[test]
    fn test_unknown_target_never_reports() {
        let mut observer = setup();
        observer.observe(ElementId(99), 0.1);
        assert!(observer.take_records().is_empty());
    }

    #[test]
    fn test_zero_height_target() {
        let mut observer = setup();
        observer.observe(ElementId(2), 0.1);
        assert!(!observer.take_records()[0].is_intersecting);

        observer.set_scroll(1200.0);
        let records = observer.take_records();
        assert!(records[0].is_intersecting);
        assert_eq!(records[0].ratio, 1.0);
    }
}
