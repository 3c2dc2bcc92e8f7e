//! End-to-end page flow: layout → mount → events → renderer.
//!
//! Run with: cargo test --test page_flow -- --nocapture

use std::time::Duration;

use chrono::NaiveTime;
use spark_folio::{
    layout_page, mount_with_clock, Block, Document, ElementId, FixedTime, MountHandle, PageConfig,
    PageEvent, RecordingRenderer, Roles, TerminalRenderer, TypingPhase, Viewport,
};
use tracing_subscriber::EnvFilter;

// =============================================================================
// PAGE FIXTURE
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Two 500px sections under a 60px fixed nav, then an unlinked footer.
///
/// ```text
///    0  section a   (hero, identity)
///  500  section b   (card 500..700, card 700..900)
/// 1000  footer      (event 1000..1300, photo 1300..1600)
/// ```
fn page() -> Document {
    let blocks = vec![
        Block::nav(60.0)
            .child(Block::nav_link("a", 80.0))
            .child(Block::nav_link("b", 80.0))
            .child(Block::new(Roles::CLOCK, 60.0).width(120.0)),
        Block::section("a", 500.0).child(
            Block::new(Roles::HERO, 300.0)
                .child(Block::new(Roles::IDENTITY, 40.0).text("Hi 👋🏽!")),
        ),
        Block::section("b", 500.0)
            .child(Block::new(Roles::PROJECT_CARD, 200.0).text("Compiler"))
            .child(Block::new(Roles::PROJECT_CARD, 200.0).text("Search")),
        Block::new(Roles::empty(), 1000.0)
            .child(Block::new(Roles::EVENT, 300.0).background("url('talk.jpg')"))
            .child(Block::new(Roles::PHOTO_ITEM, 300.0)),
    ];
    layout_page(&blocks, 1000.0).unwrap()
}

fn time() -> Box<FixedTime> {
    Box::new(FixedTime(NaiveTime::from_hms_opt(18, 5, 0).unwrap()))
}

fn setup() -> (Document, MountHandle<RecordingRenderer>) {
    init_tracing();
    let doc = page();
    let handle = mount_with_clock(
        &doc,
        PageConfig::default(),
        Viewport::new(1000.0, 600.0),
        RecordingRenderer::new(),
        time(),
    )
    .unwrap();
    (doc, handle)
}

fn ids(doc: &Document, roles: Roles) -> Vec<ElementId> {
    doc.with_roles(roles).map(|(id, _)| id).collect()
}

fn link(doc: &Document, href: &str) -> ElementId {
    doc.nav_links()
        .into_iter()
        .find(|l| l.href == href)
        .map(|l| l.element)
        .unwrap()
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[test]
fn test_scroll_scenario_highlights_expected_link() {
    let (doc, mut handle) = setup();
    let a = link(&doc, "#a");
    let b = link(&doc, "#b");

    handle.scroll_to(50.0);
    assert_eq!(handle.renderer().state().active_links(), vec![a]);

    handle.scroll_to(450.0);
    assert_eq!(handle.renderer().state().active_links(), vec![b]);

    // Past every window: nothing highlighted, nothing fails
    handle.scroll_to(1000.0);
    assert!(handle.renderer().state().active_links().is_empty());
    assert_eq!(handle.nav().and_then(|n| n.active()), None);
}

#[test]
fn test_anchor_click_lands_below_nav() {
    let (_doc, mut handle) = setup();
    handle.dispatch(PageEvent::AnchorClick { href: "#b".into() });

    let requests = handle.renderer().scroll_requests();
    assert_eq!(requests.len(), 1);
    assert!((requests[0].top - 420.0).abs() < 0.5);
}

// =============================================================================
// REVEAL
// =============================================================================

#[test]
fn test_reveal_progresses_with_scroll() {
    let (doc, mut handle) = setup();
    let cards = ids(&doc, Roles::PROJECT_CARD);
    let event = ids(&doc, Roles::EVENT)[0];
    let photo = ids(&doc, Roles::PHOTO_ITEM)[0];

    // First card is half visible at mount
    assert_eq!(handle.reveal().pending_count(), 3);
    assert_eq!(handle.renderer().state().visual(cards[0]).opacity, Some(1.0));
    assert_eq!(handle.renderer().state().visual(cards[1]).opacity, Some(0.0));

    handle.scroll_to(450.0);
    assert_eq!(handle.renderer().state().visual(cards[1]).opacity, Some(1.0));
    assert_eq!(handle.renderer().state().visual(event).opacity, Some(1.0));
    assert_eq!(handle.reveal().pending_count(), 1);

    handle.scroll_to(1000.0);
    assert_eq!(handle.renderer().state().visual(photo).opacity, Some(1.0));
    assert_eq!(handle.reveal().pending_count(), 0);
    assert_eq!(handle.observed_count(), 0);

    // Scrolling back never hides anything again
    handle.scroll_to(0.0);
    for id in ids(&doc, Roles::REVEAL) {
        assert_eq!(handle.renderer().state().visual(id).opacity, Some(1.0));
    }
}

#[test]
fn test_resize_can_reveal() {
    let (doc, mut handle) = setup();
    let second = ids(&doc, Roles::PROJECT_CARD)[1];

    handle.dispatch(PageEvent::Resize {
        width: 1000.0,
        height: 900.0,
    });
    assert_eq!(handle.renderer().state().visual(second).opacity, Some(1.0));
}

// =============================================================================
// TYPED TEXT
// =============================================================================

#[test]
fn test_identity_is_typed_by_grapheme() {
    let (doc, mut handle) = setup();
    let identity = ids(&doc, Roles::IDENTITY)[0];
    let text = |h: &MountHandle<RecordingRenderer>| {
        h.renderer().state().text(identity).map(str::to_string)
    };

    assert_eq!(text(&handle).as_deref(), Some(""));

    // Four ticks: 500, 530, 560, 590
    handle.advance(Duration::from_millis(590));
    assert_eq!(text(&handle).as_deref(), Some("Hi 👋🏽"));
    assert_eq!(handle.typed().map(|t| t.phase()), Some(TypingPhase::Typing));

    // delay + (N - 1) * interval = 500 + 4 * 30
    handle.advance(Duration::from_millis(30));
    assert_eq!(text(&handle).as_deref(), Some("Hi 👋🏽!"));
    assert_eq!(handle.typed().map(|t| t.phase()), Some(TypingPhase::Done));

    handle.advance(Duration::from_secs(5));
    assert_eq!(text(&handle).as_deref(), Some("Hi 👋🏽!"));
}

#[test]
fn test_clock_keeps_refreshing() {
    let (doc, mut handle) = setup();
    let clock = ids(&doc, Roles::CLOCK)[0];
    assert_eq!(handle.renderer().state().text(clock), Some("18:05 IST"));

    handle.advance(Duration::from_secs(3));
    assert_eq!(handle.next_timer(), Some(Duration::from_secs(4)));
}

// =============================================================================
// TERMINAL PREVIEW
// =============================================================================

#[test]
fn test_terminal_preview_follows_page() {
    init_tracing();
    let doc = page();
    let renderer = TerminalRenderer::new(Vec::new(), &doc, 60);
    let mut handle = mount_with_clock(
        &doc,
        PageConfig::default(),
        Viewport::new(1000.0, 600.0),
        renderer,
        time(),
    )
    .unwrap();

    handle.scroll_to(450.0);
    handle.advance(Duration::from_secs(1));

    let lines = handle.renderer().lines();
    assert!(lines[0].contains("[b]"));
    assert!(lines[0].ends_with("18:05 IST"));
    assert!(lines[1].starts_with("> Hi 👋🏽!_"));
    assert!(lines[1].ends_with("parallax 225px"));
    assert!(lines.iter().any(|l| l == "  ✓ Compiler"));

    handle.renderer_mut().flush().unwrap();
    handle.unmount();
}
