// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    text::Line,
};

/// Renders the summary widget: probing progress and the counters of the
/// current scan.
///
/// # Arguments
/// * `frame` - The `Frame` used for rendering the UI.
/// * `app` - A reference to the application's state.
/// * `area` - The `Rect` defining the drawable area for this widget.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Progress label
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacer
            Constraint::Length(5), // Counters
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Diagnostics
        ])
        .split(area);

    if app.state == AppState::Idle {
        return;
    }

    let progress = app.progress_percent();
    let label = Text::from(vec![
        Line::from("Progress".bold()),
        Line::from(format!(
            "{}/{} candidates probed",
            app.summary.probed(),
            app.summary.candidates
        )),
    ]);
    frame.render_widget(Paragraph::new(label).alignment(Alignment::Center), summary_chunks[0]);

    let gauge = Gauge::default()
        .percent(progress)
        .label(format!("{}%", progress))
        .style(Style::default().fg(if app.state == AppState::Finished {
            Color::Green
        } else {
            Color::Cyan
        }));
    frame.render_widget(gauge, summary_chunks[1]);

    let counters_block = Block::default().title("RESULTS".bold());
    let counter = |name: &'static str, value: usize, color: Color| {
        Line::from(vec![
            Span::raw(name),
            Span::styled(value.to_string(), Style::default().fg(color)),
        ])
    };
    let counters = vec![
        counter("Candidates: ", app.summary.candidates, Color::White),
        counter("Reported: ", app.summary.reported, Color::Green),
        counter("Failed status: ", app.summary.failed_status, Color::Yellow),
        counter("Dropped: ", app.summary.dropped, Color::Red),
    ];
    frame.render_widget(Paragraph::new(counters).block(counters_block), summary_chunks[3]);

    if !app.diagnostics.is_empty() {
        let lines: Vec<Line> = app
            .diagnostics
            .iter()
            .map(|d| Line::from(Span::styled(d.as_str(), Style::default().fg(Color::Red))))
            .collect();
        let diagnostics = Paragraph::new(lines)
            .block(Block::default().title("DIAGNOSTICS".bold()))
            .wrap(Wrap { trim: true });
        frame.render_widget(diagnostics, summary_chunks[5]);
    }
}
