//! Terminal 2048 runner (default binary).
//!
//! Mode menu, then the game loop: key presses are applied immediately and
//! the session clock advances in fixed ticks. Frames are drawn into a reused
//! framebuffer and flushed as diffs, and only when something visible changed.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tui_2048::app::{App, Control};
use tui_2048::config::AppConfig;
use tui_2048::term::{FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use tui_2048::types::TICK_MS;

/// Redraw at least this often even when nothing changed.
const HEARTBEAT_MS: u64 = 1000;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config);
    info!(seed = ?config.seed, mode = ?config.mode, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logging is opt-in and goes to stderr so it never lands on the game screen.
fn init_tracing(config: &AppConfig) {
    let Some(filter) = config.log_filter.as_deref() else {
        return;
    };
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = fmt::layer().with_writer(std::io::stderr).with_ansi(false);
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut app = App::new(config);
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(HEARTBEAT_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.frame_key()) {
            app.render_into(Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) == Control::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        let since = last_tick.elapsed();
        if since >= tick_duration {
            last_tick = Instant::now();
            app.tick(since.as_millis() as u32);
        }
    }
}
