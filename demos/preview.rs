//! Preview Example - Page behaviours driven from the terminal
//!
//! Lays out a sample portfolio, mounts it onto the terminal renderer and
//! maps keys to page events:
//!
//! - Up / Down: scroll 40px
//! - PageUp / PageDown: scroll one viewport
//! - Tab: jump to the next section through its nav anchor
//! - z: toggle zoom on the first photo
//! - q / Esc: quit
//!
//! Run with: RUST_LOG=spark_folio=debug cargo run --example preview 2>preview.log

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use spark_folio::{
    layout_page, mount, Block, Document, MountHandle, PageConfig, PageEvent, Result, Roles,
    ScrollSource, TerminalRenderer, Viewport,
};
use tracing_subscriber::EnvFilter;

const VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);
const LINE_STEP: f32 = 40.0;

fn outline() -> Vec<Block> {
    let sections = ["about", "projects", "events", "gallery"];

    let mut nav = Block::nav(64.0);
    for id in sections {
        nav = nav.child(Block::nav_link(id, 120.0));
    }
    nav = nav.child(Block::new(Roles::CLOCK, 64.0).width(160.0));

    vec![
        nav,
        Block::section("about", 720.0).child(
            Block::new(Roles::HERO, 600.0)
                .padding(120.0)
                .child(Block::new(Roles::IDENTITY, 48.0).text("Systems engineer · Rust · compilers")),
        ),
        Block::section("projects", 400.0).padding(40.0).gap(24.0).children(
            ["Incremental compiler", "Search engine", "Terminal UI"]
                .map(|name| Block::new(Roles::PROJECT_CARD, 260.0).text(name)),
        ),
        Block::section("events", 400.0).padding(40.0).gap(24.0).children([
            Block::new(Roles::EVENT, 300.0)
                .text("RustConf talk")
                .background("url(\"img/rustconf.jpg\")"),
            Block::new(Roles::ROLE, 200.0).text("Maintainer, parser crate"),
        ]),
        Block::section("gallery", 600.0).padding(40.0).gap(24.0).children(
            ["Lisbon", "Kyoto"].map(|place| Block::new(Roles::PHOTO_ITEM, 360.0).text(place)),
        ),
    ]
}

/// Href of the first section starting below the current anchor position.
fn next_section(document: &Document, scroll: f32, config: &PageConfig) -> Option<String> {
    let landing = scroll + document.nav_height().unwrap_or(0.0) + config.anchor_gap;
    let sections = document.sections();
    sections
        .iter()
        .find(|s| s.top > landing + 1.0)
        .or_else(|| sections.first())
        .map(|s| format!("#{}", s.id))
}

fn run(
    handle: &mut MountHandle<TerminalRenderer<Stdout>>,
    document: &Document,
    config: &PageConfig,
) -> Result<()> {
    let started = Instant::now();
    let first_photo = document.first(Roles::PHOTO_ITEM).map(|(id, _)| id);
    let page_end = document
        .iter()
        .map(|(_, el)| el.rect.bottom())
        .fold(0.0, f32::max);
    let max_scroll = (page_end - VIEWPORT.height).max(0.0);

    loop {
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let scroll = handle.scroll_offset();
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Down => handle.scroll_to((scroll + LINE_STEP).min(max_scroll)),
                        KeyCode::Up => handle.scroll_to(scroll - LINE_STEP),
                        KeyCode::PageDown => {
                            handle.scroll_to((scroll + VIEWPORT.height).min(max_scroll))
                        }
                        KeyCode::PageUp => handle.scroll_to(scroll - VIEWPORT.height),
                        KeyCode::Tab => {
                            if let Some(href) = next_section(document, scroll, config) {
                                handle.dispatch(PageEvent::AnchorClick { href });
                            }
                        }
                        KeyCode::Char('z') => {
                            if let Some(target) = first_photo {
                                handle.dispatch(PageEvent::Click { target });
                            }
                        }
                        _ => {}
                    }
                }
                Event::Resize(width, _) => handle.renderer_mut().set_width(width),
                _ => {}
            }
        }

        // The host owns the scroll position: honour requests immediately
        let request = handle.renderer_mut().take_scroll_request();
        if let Some(request) = request {
            handle.scroll_to(request.top.min(max_scroll));
        }

        let elapsed = started.elapsed();
        let now = handle.now();
        if elapsed > now {
            handle.advance(elapsed - now);
        }

        handle.renderer_mut().flush()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = PageConfig::default();
    let document = layout_page(&outline(), VIEWPORT.width)?;
    let (width, _) = terminal::size()?;

    let renderer = TerminalRenderer::new(io::stdout(), &document, width);
    let mut handle = mount(&document, config.clone(), VIEWPORT, renderer)?;

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run(&mut handle, &document, &config);

    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    handle.unmount();
    result
}
