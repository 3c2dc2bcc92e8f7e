//! Page configuration.
//!
//! Every tunable is a module constant; [`PageConfig`] bundles them with
//! `Default` so hosts can override individual fields:
//!
//! ```ignore
//! use spark_folio::PageConfig;
//!
//! let config = PageConfig {
//!     fade_images: true,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use std::time::Duration;

use crate::error::{FolioError, Result};
use crate::types::Rgba;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Header compensation for the active-section windows (px).
pub const HEADER_OFFSET: f32 = 100.0;

/// Fraction of a target that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Margin added around the viewport for intersection checks (px).
pub const ROOT_MARGIN: f32 = 0.0;

/// Vertical offset of not-yet-revealed elements (px).
pub const REVEAL_OFFSET: f32 = 20.0;

pub const REVEAL_DURATION: Duration = Duration::from_millis(600);

/// Time between typed characters.
pub const TYPING_INTERVAL: Duration = Duration::from_millis(30);

/// Delay before the first typed character.
pub const TYPING_DELAY: Duration = Duration::from_millis(500);

/// Hero translation per scrolled pixel.
pub const PARALLAX_SPEED: f32 = 0.5;

/// Scroll offset past which the nav bar turns (almost) opaque.
pub const NAV_SOLID_AFTER: f32 = 50.0;

pub const NAV_BACKGROUND: Rgba = Rgba::black(0.95);
pub const NAV_BACKGROUND_SOLID: Rgba = Rgba::black(0.98);

/// Extra breathing room above an anchor target (px).
pub const ANCHOR_GAP: f32 = 20.0;

/// Pointer distance (px) per degree of card tilt.
pub const TILT_DIVISOR: f32 = 20.0;
pub const TILT_PERSPECTIVE: f32 = 1000.0;
pub const TILT_LIFT: f32 = 5.0;

pub const ZOOM_DURATION: Duration = Duration::from_millis(300);
pub const IMAGE_FADE_DURATION: Duration = Duration::from_millis(500);

pub const CLOCK_REFRESH: Duration = Duration::from_secs(1);
pub const CLOCK_LABEL: &str = "IST";

// =============================================================================
// PAGE CONFIG
// =============================================================================

/// Runtime configuration for a mounted page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub header_offset: f32,
    pub reveal_threshold: f32,
    pub root_margin: f32,
    pub reveal_offset: f32,
    pub reveal_duration: Duration,
    pub typing_interval: Duration,
    pub typing_delay: Duration,
    pub parallax_speed: f32,
    pub nav_solid_after: f32,
    pub nav_background: Rgba,
    pub nav_background_solid: Rgba,
    pub anchor_gap: f32,
    pub tilt_divisor: f32,
    pub tilt_perspective: f32,
    pub tilt_lift: f32,
    pub zoom_duration: Duration,
    /// Fade images in as they scroll into view. Off by default: the fade
    /// hides images that are already loaded when they first intersect.
    pub fade_images: bool,
    pub image_fade_duration: Duration,
    pub clock_refresh: Duration,
    pub clock_label: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            header_offset: HEADER_OFFSET,
            reveal_threshold: REVEAL_THRESHOLD,
            root_margin: ROOT_MARGIN,
            reveal_offset: REVEAL_OFFSET,
            reveal_duration: REVEAL_DURATION,
            typing_interval: TYPING_INTERVAL,
            typing_delay: TYPING_DELAY,
            parallax_speed: PARALLAX_SPEED,
            nav_solid_after: NAV_SOLID_AFTER,
            nav_background: NAV_BACKGROUND,
            nav_background_solid: NAV_BACKGROUND_SOLID,
            anchor_gap: ANCHOR_GAP,
            tilt_divisor: TILT_DIVISOR,
            tilt_perspective: TILT_PERSPECTIVE,
            tilt_lift: TILT_LIFT,
            zoom_duration: ZOOM_DURATION,
            fade_images: false,
            image_fade_duration: IMAGE_FADE_DURATION,
            clock_refresh: CLOCK_REFRESH,
            clock_label: CLOCK_LABEL.to_string(),
        }
    }
}

impl PageConfig {
    /// Reject values the behaviours cannot run with.
    ///
    /// Thresholds must lie in `[0, 1]`; repeating timers must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(FolioError::InvalidThreshold(self.reveal_threshold));
        }
        if self.typing_interval.is_zero() {
            return Err(FolioError::InvalidValue("typing_interval"));
        }
        if self.clock_refresh.is_zero() {
            return Err(FolioError::InvalidValue("clock_refresh"));
        }
        if self.tilt_divisor == 0.0 {
            return Err(FolioError::InvalidValue("tilt_divisor"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.header_offset, 100.0);
        assert!((config.reveal_threshold - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.typing_interval, Duration::from_millis(30));
        assert_eq!(config.typing_delay, Duration::from_millis(500));
        assert!(!config.fade_images);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = PageConfig {
            reveal_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FolioError::InvalidThreshold(t)) if t == 1.5
        ));

        let config = PageConfig {
            reveal_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let config = PageConfig {
            typing_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FolioError::InvalidValue("typing_interval"))
        ));

        let config = PageConfig {
            clock_refresh: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
