//! betaboard - terminal dashboard for company returns and market beta

mod app;
mod engine;
mod event;
mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use betaboard_data::{PriceFetcher, YahooFinanceClient};
use event::{handle_key_event, poll_event};
use ui::draw_ui;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Fetches are async only because the provider client is. The session
    // itself is single threaded: one run blocks until every fetch finished.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let fetcher = YahooFinanceClient::new();

    let result = run_app(&mut terminal, &mut app, &runtime, &fetcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runtime: &tokio::runtime::Runtime,
    fetcher: &impl PriceFetcher,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| draw_ui(frame, app))?;

        if let Some(event) = poll_event(tick_rate)? {
            match event {
                Event::Key(key) => handle_key_event(app, key),
                Event::Resize(_, _) => {} // Terminal will redraw automatically
                _ => {}
            }
        }

        if app.take_recompute_request() {
            // show the fetching state once, then block on the run
            app.loading = true;
            terminal.draw(|frame| draw_ui(frame, app))?;

            app.recompute(runtime, fetcher);
            app.loading = false;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Tracing to stderr so log lines survive the alternate screen.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
