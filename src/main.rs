//! App.co TUI - submit a decentralized app to the App.co directory
//!
//! A Ratatui-based form that validates the listing, handles the
//! Blockstack sign-in hand-off for App Mining, and posts the submission
//! to the App.co API.

mod api;
mod app;
mod config;
mod platform;
mod state;
mod submission;
mod ui;

use anyhow::Result;
use api::HttpSubmissionClient;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{ReferralParams, Session, SnapshotStore};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Launch URL carrying `referralCode` / `refSource`, when not passed as an argument
const LAUNCH_URL_ENV: &str = "APPCO_LAUNCH_URL";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appco_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = TuiConfig::load()?;
    let api = HttpSubmissionClient::new(config.api_server(), config.request_timeout())?;
    let store = SnapshotStore::new(config::store_dir());
    tracing::debug!(
        endpoint = api.endpoint(),
        store = %store.dir().display(),
        "starting app submission"
    );
    let launch_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(LAUNCH_URL_ENV).ok())
        .unwrap_or_default();
    let referral = ReferralParams::from_query(&launch_url);

    let mut app = App::new(config, Arc::new(api), store, Session::from_env(), referral)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    if let Some(message) = app.exit_message() {
        println!("{message}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key).await?;
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
