// src/ui/widgets/results.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use crate::core::models::{ProbeResult, ProbeStatus};
use ratatui::{
    layout::Margin,
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, Table, Wrap},
};

/// Renders the probe table, or a placeholder while there is nothing to show.
pub fn render_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let results_block = Block::default()
        .borders(Borders::ALL)
        .title("Probe Results (Navigate with ↑ ↓)");

    if app.rows.is_empty() {
        let placeholder = match app.state {
            AppState::Idle => Paragraph::new(
                "Enter a domain and press Enter to search the certificate transparency logs.\n\
                 Every subdomain found is probed over HTTP and HTTPS.",
            )
            .wrap(Wrap { trim: true }),
            AppState::Scanning => Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{} ", SPINNER_CHARS[app.spinner_frame]),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw("Searching and probing... Please wait."),
            ]))
            .alignment(Alignment::Center),
            AppState::Finished => match &app.error {
                Some(message) => Paragraph::new(message.as_str())
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center),
                None => Paragraph::new("No candidate answered.").alignment(Alignment::Center),
            },
        };
        frame.render_widget(placeholder.block(results_block), area);
        return;
    }

    let header = Row::new(vec!["Domain Name", "HTTP Status Code", "HTTPS Status Code"])
        .style(Style::default().bold().underlined());

    let rows: Vec<Row> = app
        .rows
        .iter()
        .skip(app.scroll_offset)
        .map(build_row)
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(50), Constraint::Percentage(25), Constraint::Percentage(25)],
    )
    .header(header)
    .block(results_block);
    frame.render_widget(table, area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin { vertical: 1, horizontal: 0 }),
        &mut app.report_scroll_state,
    );
}

fn build_row(result: &ProbeResult) -> Row<'_> {
    Row::new(vec![
        Cell::from(result.name.as_str()),
        status_cell(&result.http),
        status_cell(&result.https),
    ])
}

fn status_cell(status: &ProbeStatus) -> Cell<'static> {
    let style = match status {
        ProbeStatus::Ok(_) => Style::default().fg(Color::Green),
        ProbeStatus::Failed(_) => Style::default().fg(Color::Yellow),
        ProbeStatus::Unreachable => Style::default().fg(Color::Red),
    };
    Cell::from(Span::styled(status.to_string(), style))
}
