//! Scroll Effects - Parallax hero and nav backdrop
//!
//! Both are pure functions of the scroll offset, held in signals so the
//! render effects only run when the value actually changes.

use spark_signals::{signal, Signal};

use crate::config::PageConfig;
use crate::pipeline::events::ScrollEvent;
use crate::types::{ElementId, Rgba};

// =============================================================================
// PARALLAX
// =============================================================================

/// Hero translation for a scroll offset.
pub fn parallax_offset(scroll: f32, speed: f32) -> f32 {
    scroll * speed
}

/// Moves the hero at a fraction of the scroll speed.
pub struct Parallax {
    hero: ElementId,
    speed: f32,
    offset: Signal<f32>,
}

impl Parallax {
    pub fn new(hero: ElementId, speed: f32) -> Self {
        Self {
            hero,
            speed,
            offset: signal(0.0),
        }
    }

    pub fn handle(&mut self, event: &ScrollEvent) {
        let next = parallax_offset(event.offset, self.speed);
        if self.offset.get() != next {
            self.offset.set(next);
        }
    }

    pub fn hero(&self) -> ElementId {
        self.hero
    }

    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    pub fn offset_signal(&self) -> Signal<f32> {
        self.offset.clone()
    }
}

// =============================================================================
// NAV BACKDROP
// =============================================================================

/// Nav background for a scroll offset.
pub fn nav_background(scroll: f32, config: &PageConfig) -> Rgba {
    if scroll > config.nav_solid_after {
        config.nav_background_solid
    } else {
        config.nav_background
    }
}

/// Darkens the nav bar once the page is scrolled.
pub struct NavBackdrop {
    nav: ElementId,
    config: PageConfig,
    color: Signal<Rgba>,
}

impl NavBackdrop {
    pub fn new(nav: ElementId, config: &PageConfig) -> Self {
        Self {
            nav,
            color: signal(config.nav_background),
            config: config.clone(),
        }
    }

    pub fn handle(&mut self, event: &ScrollEvent) {
        let next = nav_background(event.offset, &self.config);
        if self.color.get() != next {
            self.color.set(next);
        }
    }

    pub fn nav(&self) -> ElementId {
        self.nav
    }

    pub fn color(&self) -> Rgba {
        self.color.get()
    }

    pub fn color_signal(&self) -> Signal<Rgba> {
        self.color.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax() {
        let mut p = Parallax::new(ElementId(0), 0.5);
        assert_eq!(p.offset(), 0.0);
        p.handle(&ScrollEvent::new(300.0));
        assert_eq!(p.offset(), 150.0);
        assert_eq!(parallax_offset(10.0, 0.5), 5.0);
    }

    #[test]
    fn test_nav_background_threshold() {
        let config = PageConfig::default();
        assert_eq!(nav_background(0.0, &config), Rgba::black(0.95));
        assert_eq!(nav_background(50.0, &config), Rgba::black(0.95));
        assert_eq!(nav_background(50.5, &config), Rgba::black(0.98));
    }

    #[test]
    fn test_backdrop_signal_changes_only_on_crossing() {
        let config = PageConfig::default();
        let mut backdrop = NavBackdrop::new(ElementId(0), &config);
        let sig = backdrop.color_signal();

        backdrop.handle(&ScrollEvent::new(10.0));
        assert_eq!(sig.get(), config.nav_background);

        backdrop.handle(&ScrollEvent::new(400.0));
        assert_eq!(backdrop.color(), config.nav_background_solid);

        backdrop.handle(&ScrollEvent::new(0.0));
        assert_eq!(backdrop.color(), config.nav_background);
    }
}
