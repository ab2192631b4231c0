// src/main.rs

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

mod app;
mod cli;
mod core;
mod logging;
mod report;
mod ui;

use app::{App, ScanUpdate};
use cli::Cli;
use crate::core::lookup::CrtShClient;
use crate::core::prober::HttpProber;
use crate::core::runner::run_scan;
use report::ConsoleSink;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::initialize_logging()?;
    info!(log = %log_path.display(), tui = cli.tui, "crtprobe starting.");

    if cli.tui {
        run_dashboard(&cli).await?;
        Ok(ExitCode::SUCCESS)
    } else {
        run_console(&cli).await
    }
}

/// Prints the plain-text report for one domain. A scan that gets no
/// certificate data ends with a failure exit code.
async fn run_console(cli: &Cli) -> Result<ExitCode> {
    let target = cli.target().ok_or_else(|| eyre!("a domain is required"))?;
    let lookup = CrtShClient::new(cli.lookup_settings())?;
    let prober = HttpProber::new(cli.probe_settings())?;
    let mut sink = ConsoleSink::new(stdout());

    match run_scan(&lookup, &prober, &target, cli.search_options(), &mut sink).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_dashboard(cli: &Cli) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let outcome = dashboard_loop(&mut terminal, cli);

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    outcome
}

fn dashboard_loop<B: Backend>(terminal: &mut Terminal<B>, cli: &Cli) -> Result<()> {
    let mut app = App::new();
    if let Some(domain) = &cli.domain {
        app.input = domain.clone();
    }
    let (tx, mut rx): (UnboundedSender<ScanUpdate>, UnboundedReceiver<ScanUpdate>) =
        mpsc::unbounded_channel();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, cli, &tx)?;
        }

        while let Ok(update) = rx.try_recv() {
            app.apply(update);
        }
        app.on_tick();
    }
    Ok(())
}

/// Single entry point for key handling.
fn handle_events(app: &mut App, cli: &Cli, tx: &UnboundedSender<ScanUpdate>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if let Some(target) = app.on_key(key.code) {
            app::spawn_scan(cli, target, tx.clone());
        }
    }
    Ok(())
}
