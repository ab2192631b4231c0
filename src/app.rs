// src/app.rs

use crate::cli::Cli;
use crate::core::lookup::CrtShClient;
use crate::core::models::{ProbeResult, ScanEvent, ScanSummary};
use crate::core::normalize_target;
use crate::core::prober::HttpProber;
use crate::core::runner::{run_scan, ScanSink};
use crossterm::event::KeyCode;
use ratatui::widgets::ScrollbarState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info};

pub const SPINNER_CHARS: [char; 10] = [
    '⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏',
];

/// Messages from the scan task to the dashboard.
#[derive(Debug)]
pub enum ScanUpdate {
    Event(ScanEvent),
    Finished(Result<ScanSummary, String>),
}

/// Forwards scan events to the dashboard over a channel.
pub struct ChannelSink {
    tx: UnboundedSender<ScanUpdate>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ScanUpdate>) -> Self {
        Self { tx }
    }
}

impl ScanSink for ChannelSink {
    fn emit(&mut self, event: ScanEvent) {
        // The receiver only disappears when the dashboard is shutting down.
        let _ = self.tx.send(ScanUpdate::Event(event));
    }
}

/// Runs a scan on its own task and reports back through `tx`.
///
/// Candidates are still probed one at a time; the task only keeps the
/// dashboard responsive while requests are in flight.
pub fn spawn_scan(cli: &Cli, target: String, tx: UnboundedSender<ScanUpdate>) {
    let lookup_settings = cli.lookup_settings();
    let probe_settings = cli.probe_settings();
    let options = cli.search_options();

    tokio::spawn(async move {
        info!(target = %target, "Dashboard scan started.");
        let clients = (CrtShClient::new(lookup_settings), HttpProber::new(probe_settings));
        let outcome = match clients {
            (Ok(lookup), Ok(prober)) => {
                let mut sink = ChannelSink::new(tx.clone());
                run_scan(&lookup, &prober, &target, options, &mut sink)
                    .await
                    .map_err(|e| e.to_string())
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Failed to build HTTP client for the scan.");
                Err(format!("Failed to build HTTP client: {}", e))
            }
        };
        let _ = tx.send(ScanUpdate::Finished(outcome));
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

pub struct App {
    pub should_quit: bool,
    pub show_disclaimer: bool,
    pub state: AppState,
    pub input: String,
    pub target: Option<String>,
    pub rows: Vec<ProbeResult>,
    pub diagnostics: Vec<String>,
    pub summary: ScanSummary,
    pub error: Option<String>,
    pub scroll_offset: usize,
    pub report_scroll_state: ScrollbarState,
    pub spinner_frame: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            show_disclaimer: true,
            state: AppState::Idle,
            input: String::new(),
            target: None,
            rows: Vec::new(),
            diagnostics: Vec::new(),
            summary: ScanSummary::default(),
            error: None,
            scroll_offset: 0,
            report_scroll_state: ScrollbarState::default(),
            spinner_frame: 0,
        }
    }

    pub fn acknowledge_disclaimer(&mut self) {
        self.show_disclaimer = false;
    }

    /// Routes one key press. Returns the target when the press starts a scan.
    pub fn on_key(&mut self, code: KeyCode) -> Option<String> {
        if self.show_disclaimer {
            match code {
                KeyCode::Enter => self.acknowledge_disclaimer(),
                KeyCode::Esc => self.quit(),
                _ => {}
            }
            return None;
        }
        match self.state {
            AppState::Idle => return self.on_idle_key(code),
            AppState::Finished if code == KeyCode::Char('n') => self.reset(),
            AppState::Scanning | AppState::Finished => self.on_report_key(code),
        }
        None
    }

    /// Typing a domain. `q` is a valid character here, so `Esc` quits.
    fn on_idle_key(&mut self, code: KeyCode) -> Option<String> {
        match code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => return self.start_scan(),
            _ => {}
        }
        None
    }

    fn on_report_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Up => self.scroll_up(),
            KeyCode::Down => self.scroll_down(),
            _ => {}
        }
    }

    /// Moves to `Scanning` and returns the normalized target, unless the
    /// input is empty.
    pub fn start_scan(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        let target = normalize_target(&self.input);
        self.reset_results();
        self.state = AppState::Scanning;
        self.target = Some(target.clone());
        Some(target)
    }

    pub fn apply(&mut self, update: ScanUpdate) {
        match update {
            ScanUpdate::Event(event) => {
                self.summary.record(&event);
                match event {
                    ScanEvent::Probed(result) => {
                        self.rows.push(result);
                        self.report_scroll_state =
                            self.report_scroll_state.content_length(self.rows.len());
                    }
                    ScanEvent::Diagnostic(message) => self.diagnostics.push(message),
                    ScanEvent::CandidatesFound(_) | ScanEvent::Dropped(_) => {}
                }
            }
            ScanUpdate::Finished(Ok(summary)) => {
                self.summary = summary;
                self.state = AppState::Finished;
            }
            ScanUpdate::Finished(Err(message)) => {
                self.error = Some(message);
                self.state = AppState::Finished;
            }
        }
    }

    /// Share of candidates probed so far, in percent.
    pub fn progress_percent(&self) -> u16 {
        if self.summary.candidates == 0 {
            return if self.state == AppState::Finished { 100 } else { 0 };
        }
        let done = self.summary.probed().min(self.summary.candidates);
        (done * 100 / self.summary.candidates) as u16
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn scroll_down(&mut self) {
        let last = self.rows.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(last);
        self.report_scroll_state = self.report_scroll_state.position(self.scroll_offset);
    }

    pub fn on_tick(&mut self) {
        if self.state == AppState::Scanning {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.target = None;
        self.reset_results();
    }

    fn reset_results(&mut self) {
        self.rows.clear();
        self.diagnostics.clear();
        self.summary = ScanSummary::default();
        self.error = None;
        self.scroll_offset = 0;
        self.report_scroll_state = ScrollbarState::default();
        self.spinner_frame = 0;
    }
}
