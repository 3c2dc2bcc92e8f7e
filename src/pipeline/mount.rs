//! Mount API - Page lifecycle and render effects.
//!
//! Mounting resolves every behaviour's elements from the document, starts
//! the ones whose elements are present, and wires one effect per piece of
//! observable state so changes flow to the renderer on their own.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::pipeline::{mount, PageEvent, ScrollEvent};
//! use spark_folio::renderer::RecordingRenderer;
//!
//! let mut handle = mount(document, PageConfig::default(), viewport, RecordingRenderer::new())?;
//!
//! // Feed host events
//! handle.dispatch(PageEvent::Scroll(ScrollEvent::new(450.0)));
//!
//! // Let virtual time pass (typing, clock)
//! handle.advance(Duration::from_millis(800));
//!
//! // Clean up
//! handle.unmount();
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

use spark_signals::effect;
use tracing::{debug, info, trace};

use crate::config::PageConfig;
use crate::document::Document;
use crate::error::Result;
use crate::renderer::Renderer;
use crate::state::anchor::AnchorNavigator;
use crate::state::clock::{Clock, LocalTime, TimeSource};
use crate::state::gallery::{PhotoZoom, ZOOMED_CLASS};
use crate::state::images::{EventBackdrops, ImageFader};
use crate::state::nav::{link_is_active, NavHighlighter};
use crate::state::reveal::{RevealAnimator, RevealOptions};
use crate::state::scroll_fx::{NavBackdrop, Parallax};
use crate::state::tilt::{CardTilt, TiltOptions};
use crate::state::typing::TypedText;
use crate::types::{ElementId, RevealPhase, Roles, Transform, Viewport, Visual};

use super::events::{IntersectionEvent, PageEvent, ScrollEvent, ScrollSource};
use super::observer::ViewportObserver;
use super::timers::{TimerQueue, TimerTask};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]. Owns every behaviour of the page.
///
/// Dropping the handle stops the render effects; [`MountHandle::unmount`]
/// also cancels pending timers and logs the teardown.
pub struct MountHandle<R: Renderer + 'static> {
    renderer: Rc<RefCell<R>>,
    viewport: Viewport,
    scroll: f32,
    observer: ViewportObserver,
    timers: TimerQueue,
    nav: Option<NavHighlighter>,
    reveal: RevealAnimator,
    typed: Option<TypedText>,
    anchors: AnchorNavigator,
    parallax: Option<Parallax>,
    backdrop: Option<NavBackdrop>,
    tilt: CardTilt,
    zoom: PhotoZoom,
    clock: Option<Clock>,
    images: Option<ImageFader>,
    backgrounds: EventBackdrops,
    stop_effects: Vec<Box<dyn FnOnce()>>,
}

impl<R: Renderer + 'static> MountHandle<R> {
    /// React to one host event.
    pub fn dispatch(&mut self, event: PageEvent) {
        trace!(?event, "dispatch");
        match event {
            PageEvent::Scroll(scroll) => self.handle_scroll(scroll),
            PageEvent::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.observer.set_viewport(self.viewport);
                self.flush_intersections();
            }
            PageEvent::Intersection(record) => self.route_intersection(&record),
            PageEvent::Timer(task) => self.handle_timer(task),
            PageEvent::PointerMove {
                target,
                client_x,
                client_y,
            } => {
                if let Some(visual) = self.tilt.handle_move(target, client_x, client_y, self.scroll) {
                    self.renderer.borrow_mut().set_visual(target, &visual);
                }
            }
            PageEvent::PointerLeave { target } => {
                if let Some(visual) = self.tilt.handle_leave(target) {
                    self.renderer.borrow_mut().set_visual(target, &visual);
                }
            }
            PageEvent::Click { target } => {
                if let Some(zoomed) = self.zoom.toggle(target) {
                    let mut renderer = self.renderer.borrow_mut();
                    renderer.set_visual(target, &Visual::default().with_transition(self.zoom.transition()));
                    renderer.set_class(target, ZOOMED_CLASS, zoomed);
                }
            }
            PageEvent::AnchorClick { href } => {
                if let Some(request) = self.anchors.handle(&href) {
                    self.renderer.borrow_mut().scroll_to(request);
                }
            }
            PageEvent::ImageLoaded { target } => {
                if let Some(visual) = self.images.as_mut().and_then(|f| f.handle_loaded(target)) {
                    self.renderer.borrow_mut().set_visual(target, &visual);
                }
            }
            PageEvent::BackgroundLoaded { target } => {
                if self.backgrounds.handle_loaded(target) {
                    self.renderer.borrow_mut().set_background_fit(target);
                }
            }
        }
    }

    /// Let `dt` of virtual time pass, firing every timer due in between.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.timers.now() + dt;
        while let Some(task) = self.timers.pop_due(until) {
            self.handle_timer(task);
        }
        self.timers.advance_to(until);
    }

    /// Shorthand for dispatching a scroll to `offset`.
    pub fn scroll_to(&mut self, offset: f32) {
        self.dispatch(PageEvent::Scroll(ScrollEvent::new(offset)));
    }

    /// Pull the offset from `source` and dispatch a scroll if it moved.
    pub fn poll_scroll(&mut self, source: &dyn ScrollSource) {
        let offset = source.scroll_offset().max(0.0);
        if offset != self.scroll {
            self.scroll_to(offset);
        }
    }

    /// Virtual time since mount.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Time of the next pending timer, if any.
    pub fn next_timer(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn renderer(&self) -> Ref<'_, R> {
        self.renderer.borrow()
    }

    pub fn renderer_mut(&self) -> RefMut<'_, R> {
        self.renderer.borrow_mut()
    }

    pub fn nav(&self) -> Option<&NavHighlighter> {
        self.nav.as_ref()
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    pub fn typed(&self) -> Option<&TypedText> {
        self.typed.as_ref()
    }

    pub fn clock(&self) -> Option<&Clock> {
        self.clock.as_ref()
    }

    /// Number of element observations still live.
    pub fn observed_count(&self) -> usize {
        self.observer.observed_count()
    }

    /// Stop everything and release the renderer.
    pub fn unmount(mut self) {
        self.stop();
        self.timers.clear_all();
        info!("page unmounted");
    }

    fn stop(&mut self) {
        for stop in self.stop_effects.drain(..) {
            stop();
        }
    }

    fn handle_scroll(&mut self, event: ScrollEvent) {
        // Hosts may build the event directly; clamp once for every consumer
        let event = ScrollEvent::new(event.offset);
        self.scroll = event.offset;

        if let Some(nav) = &mut self.nav {
            nav.handle(&event);
        }
        if let Some(parallax) = &mut self.parallax {
            parallax.handle(&event);
        }
        if let Some(backdrop) = &mut self.backdrop {
            backdrop.handle(&event);
        }

        self.observer.set_scroll(event.offset);
        self.flush_intersections();
    }

    fn handle_timer(&mut self, task: TimerTask) {
        match task {
            TimerTask::TypeNextChar => {
                if let Some(typed) = &mut self.typed {
                    typed.handle_tick(&mut self.timers);
                }
            }
            TimerTask::RefreshClock => {
                if let Some(clock) = &mut self.clock {
                    clock.refresh();
                }
            }
        }
    }

    fn flush_intersections(&mut self) {
        for record in self.observer.take_records() {
            self.route_intersection(&record);
        }
    }

    fn route_intersection(&mut self, record: &IntersectionEvent) {
        self.reveal.handle(record, &mut self.observer);

        if let Some(fader) = &mut self.images {
            if let Some(visual) = fader.handle_intersection(record, &mut self.observer) {
                self.renderer.borrow_mut().set_visual(record.target, &visual);
            }
        }
    }
}

impl<R: Renderer + 'static> ScrollSource for MountHandle<R> {
    fn scroll_offset(&self) -> f32 {
        self.scroll
    }
}

impl<R: Renderer + 'static> Drop for MountHandle<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the page behaviours with the host's local time for the clock.
///
/// See [`mount_with_clock`].
pub fn mount<R: Renderer + 'static>(
    document: &Document,
    config: PageConfig,
    viewport: Viewport,
    renderer: R,
) -> Result<MountHandle<R>> {
    mount_with_clock(document, config, viewport, renderer, Box::new(LocalTime))
}

/// Mount the page behaviours.
///
/// This sets up:
/// 1. Visibility observation over the document geometry
/// 2. Reveal enrollment (targets start hidden)
/// 3. Nav highlighting, parallax and nav backdrop on scroll
/// 4. The typed identity line and the clock on virtual timers
/// 5. Tilt, photo zoom, anchor scrolling, image fade and event backgrounds
///
/// Behaviours whose elements are missing are skipped. The page is assumed
/// to start at scroll offset 0; nothing is highlighted until the first
/// scroll event.
pub fn mount_with_clock<R: Renderer + 'static>(
    document: &Document,
    config: PageConfig,
    viewport: Viewport,
    renderer: R,
    time: Box<dyn TimeSource>,
) -> Result<MountHandle<R>> {
    config.validate()?;

    let renderer = Rc::new(RefCell::new(renderer));
    let mut observer = ViewportObserver::new(document, viewport, config.root_margin);
    let mut timers = TimerQueue::new();
    let mut stop_effects: Vec<Box<dyn FnOnce()>> = Vec::new();

    // Reveal: enroll first so the hidden state is painted before any record
    let reveal = RevealAnimator::enroll(
        document.with_roles(Roles::REVEAL).map(|(id, _)| id),
        RevealOptions::from(&config),
        &mut observer,
    );
    let hidden = reveal.hidden_visual();
    let revealed = reveal.revealed_visual();
    let targets: Vec<ElementId> = reveal.targets().collect();
    for element in targets {
        let Some(phase) = reveal.phase_signal(element) else {
            continue;
        };
        let renderer = renderer.clone();
        let stop = effect(move || {
            let visual = match phase.get() {
                RevealPhase::Pending => hidden,
                RevealPhase::Revealed => revealed,
            };
            renderer.borrow_mut().set_visual(element, &visual);
        });
        stop_effects.push(Box::new(stop));
    }

    // Nav highlighting
    let sections = document.sections();
    let links = document.nav_links();
    let nav = if sections.is_empty() || links.is_empty() {
        debug!(
            sections = sections.len(),
            links = links.len(),
            "nav highlighting skipped"
        );
        None
    } else {
        let nav = NavHighlighter::new(sections, links.clone(), config.header_offset);
        let active = nav.active_signal();
        let renderer = renderer.clone();
        let stop = effect(move || {
            let current = active.get();
            let mut renderer = renderer.borrow_mut();
            for link in &links {
                renderer.set_link_active(link.element, link_is_active(link, current.as_deref()));
            }
        });
        stop_effects.push(Box::new(stop));
        Some(nav)
    };

    // Typed identity line: start clears the text before the effect first paints
    let typed = match document.first(Roles::IDENTITY) {
        Some((id, element)) => {
            let mut typed = TypedText::new(id, element.text.clone());
            typed.start(&mut timers, &config);
            let text = typed.displayed_signal();
            let renderer = renderer.clone();
            let stop = effect(move || {
                let current = text.get();
                renderer.borrow_mut().set_text(id, &current);
            });
            stop_effects.push(Box::new(stop));
            Some(typed)
        }
        None => {
            debug!("identity element missing, typing skipped");
            None
        }
    };

    // Parallax hero
    let parallax = match document.first(Roles::HERO) {
        Some((hero, _)) => {
            let parallax = Parallax::new(hero, config.parallax_speed);
            let offset = parallax.offset_signal();
            let renderer = renderer.clone();
            let stop = effect(move || {
                let visual = Visual::transform(Transform::TranslateY(offset.get()));
                renderer.borrow_mut().set_visual(hero, &visual);
            });
            stop_effects.push(Box::new(stop));
            Some(parallax)
        }
        None => {
            debug!("hero missing, parallax skipped");
            None
        }
    };

    // Nav backdrop
    let backdrop = match document.first(Roles::NAV) {
        Some((nav, _)) => {
            let backdrop = NavBackdrop::new(nav, &config);
            let color = backdrop.color_signal();
            let renderer = renderer.clone();
            let stop = effect(move || {
                let current = color.get();
                renderer.borrow_mut().set_nav_background(nav, current);
            });
            stop_effects.push(Box::new(stop));
            Some(backdrop)
        }
        None => {
            debug!("nav missing, backdrop skipped");
            None
        }
    };

    // Clock
    let clock = match document.first(Roles::CLOCK) {
        Some((id, _)) => {
            let mut clock = Clock::new(id, config.clock_label.clone(), time);
            clock.start(&mut timers, config.clock_refresh);
            let text = clock.text_signal();
            let renderer = renderer.clone();
            let stop = effect(move || {
                let current = text.get();
                renderer.borrow_mut().set_text(id, &current);
            });
            stop_effects.push(Box::new(stop));
            Some(clock)
        }
        None => {
            debug!("clock element missing, clock skipped");
            None
        }
    };

    // Pointer and click behaviours
    let tilt = CardTilt::new(
        document
            .with_roles(Roles::PROJECT_CARD)
            .map(|(id, el)| (id, el.rect)),
        TiltOptions::from(&config),
    );
    let zoom = PhotoZoom::new(
        document.with_roles(Roles::PHOTO_ITEM).map(|(id, _)| id),
        config.zoom_duration,
    );
    let anchors = AnchorNavigator::from_document(document, config.anchor_gap);

    // Images
    let images = config.fade_images.then(|| {
        ImageFader::enroll(
            document.with_roles(Roles::IMAGE).map(|(id, _)| id),
            config.image_fade_duration,
            &mut observer,
        )
    });
    let backgrounds = EventBackdrops::new(
        document
            .with_roles(Roles::EVENT)
            .map(|(id, el)| (id, el.background.as_deref())),
    );
    {
        let mut renderer = renderer.borrow_mut();
        for (element, url) in backgrounds.requests() {
            renderer.preload_background(element, &url);
        }
    }

    let mut handle = MountHandle {
        renderer,
        viewport,
        scroll: 0.0,
        observer,
        timers,
        nav,
        reveal,
        typed,
        anchors,
        parallax,
        backdrop,
        tilt,
        zoom,
        clock,
        images,
        backgrounds,
        stop_effects,
    };

    // Initial visibility check, like an observer's first callback
    handle.flush_intersections();

    info!(
        reveal_targets = handle.reveal.targets().count(),
        nav = handle.nav.is_some(),
        typing = handle.typed.is_some(),
        clock = handle.clock.is_some(),
        "page behaviours initialized"
    );

    Ok(handle)
}

// =============================================================================
// Tests
// =============================================================================
