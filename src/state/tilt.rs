//! Card Tilt - 3D tilt of project cards under the pointer
//!
//! Pointer coordinates arrive in viewport space. The card's viewport rect
//! is its document rect shifted by the current scroll offset.

use std::collections::HashMap;

use crate::config::PageConfig;
use crate::types::{ElementId, Rect, Transform, Visual};

/// Tilt parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltOptions {
    pub divisor: f32,
    pub perspective: f32,
    pub lift: f32,
}

impl From<&PageConfig> for TiltOptions {
    fn from(config: &PageConfig) -> Self {
        Self {
            divisor: config.tilt_divisor,
            perspective: config.tilt_perspective,
            lift: config.tilt_lift,
        }
    }
}

/// Tilt for a pointer at `(x, y)` relative to the card's top-left corner.
pub fn tilt_transform(width: f32, height: f32, x: f32, y: f32, options: &TiltOptions) -> Transform {
    let center_x = width / 2.0;
    let center_y = height / 2.0;

    Transform::Tilt {
        perspective: options.perspective,
        rotate_x: (y - center_y) / options.divisor,
        rotate_y: (center_x - x) / options.divisor,
        lift: options.lift,
    }
}

/// Tilt state for all project cards.
#[derive(Debug, Clone)]
pub struct CardTilt {
    cards: HashMap<ElementId, Rect>,
    options: TiltOptions,
}

impl CardTilt {
    pub fn new(cards: impl IntoIterator<Item = (ElementId, Rect)>, options: TiltOptions) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            options,
        }
    }

    /// Visual for a pointer move over `target`. `None` if it is not a card.
    pub fn handle_move(&self, target: ElementId, client_x: f32, client_y: f32, scroll: f32) -> Option<Visual> {
        let rect = self.cards.get(&target)?;
        let x = client_x - rect.left();
        let y = client_y - (rect.top() - scroll);
        Some(Visual::transform(tilt_transform(
            rect.width,
            rect.height,
            x,
            y,
            &self.options,
        )))
    }

    /// Visual for the pointer leaving `target`: the transform is cleared.
    pub fn handle_leave(&self, target: ElementId) -> Option<Visual> {
        self.cards
            .contains_key(&target)
            .then(|| Visual::transform(Transform::None))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> CardTilt {
        CardTilt::new(
            [(ElementId(4), Rect::new(100.0, 1000.0, 400.0, 200.0))],
            TiltOptions::from(&PageConfig::default()),
        )
    }

    #[test]
    fn test_center_is_flat() {
        let t = tilt_transform(400.0, 200.0, 200.0, 100.0, &TiltOptions::from(&PageConfig::default()));
        assert_eq!(
            t,
            Transform::Tilt {
                perspective: 1000.0,
                rotate_x: 0.0,
                rotate_y: 0.0,
                lift: 5.0
            }
        );
    }

    #[test]
    fn test_move_uses_viewport_coordinates() {
        let tilt = setup();
        // Card top at 1000, scrolled 900 → card top at 100 in the viewport.
        // Pointer at card-local (0, 0): rotateX = -100/20, rotateY = 200/20.
        let visual = tilt.handle_move(ElementId(4), 100.0, 100.0, 900.0).unwrap();
        assert_eq!(
            visual.transform,
            Some(Transform::Tilt {
                perspective: 1000.0,
                rotate_x: -5.0,
                rotate_y: 10.0,
                lift: 5.0
            })
        );
        assert_eq!(visual.opacity, None);
    }

    #[test]
    fn test_leave_clears_transform() {
        let tilt = setup();
        let visual = tilt.handle_leave(ElementId(4)).unwrap();
        assert_eq!(visual.transform, Some(Transform::None));
    }

    #[test]
    fn test_non_cards_ignored() {
        let tilt = setup();
        assert!(tilt.handle_move(ElementId(1), 0.0, 0.0, 0.0).is_none());
        assert!(tilt.handle_leave(ElementId(1)).is_none());
    }
}
