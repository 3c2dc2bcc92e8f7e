//! Photo Zoom - Click-to-zoom toggle for gallery items

use std::collections::HashMap;
use std::time::Duration;

use crate::types::{ElementId, Transition};

/// Class toggled on zoomed photos.
pub const ZOOMED_CLASS: &str = "zoomed";

/// Zoom state per photo item.
#[derive(Debug, Clone, Default)]
pub struct PhotoZoom {
    zoomed: HashMap<ElementId, bool>,
    duration: Duration,
}

impl PhotoZoom {
    pub fn new(photos: impl IntoIterator<Item = ElementId>, duration: Duration) -> Self {
        Self {
            zoomed: photos.into_iter().map(|id| (id, false)).collect(),
            duration,
        }
    }

    /// Toggle zoom on `target`. Returns the new state, `None` if not a photo.
    pub fn toggle(&mut self, target: ElementId) -> Option<bool> {
        let zoomed = self.zoomed.get_mut(&target)?;
        *zoomed = !*zoomed;
        Some(*zoomed)
    }

    pub fn is_zoomed(&self, target: ElementId) -> bool {
        self.zoomed.get(&target).copied().unwrap_or(false)
    }

    pub fn transition(&self) -> Transition {
        Transition::All(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut zoom = PhotoZoom::new([ElementId(2)], Duration::from_millis(300));
        assert!(!zoom.is_zoomed(ElementId(2)));
        assert_eq!(zoom.toggle(ElementId(2)), Some(true));
        assert!(zoom.is_zoomed(ElementId(2)));
        assert_eq!(zoom.toggle(ElementId(2)), Some(false));
        assert_eq!(zoom.transition().to_string(), "all 0.3s ease");
    }

    #[test]
    fn test_non_photo_ignored() {
        let mut zoom = PhotoZoom::new([ElementId(2)], Duration::from_millis(300));
        assert_eq!(zoom.toggle(ElementId(3)), None);
        assert!(!zoom.is_zoomed(ElementId(3)));
    }
}
