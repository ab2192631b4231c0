// src/ui/widgets/disclaimer_popup.rs

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    text::Line,
};

/// Renders the disclaimer popup on top of the existing UI.
///
/// The lookup itself only reads public certificate transparency data, but
/// every name found is then contacted over HTTP and HTTPS. The popup says so
/// before the first scan.
pub fn render_disclaimer_popup(frame: &mut Frame, area: Rect) {
    let disclaimer_text = Text::from(vec![
        Line::from("BEFORE YOU START".bold().yellow()),
        Line::from(""),
        Line::from(
            "crtprobe searches public certificate transparency logs for the subdomains \
             of a domain, then sends HTTP and HTTPS requests to every name it finds.",
        ),
        Line::from(""),
        Line::from(
            "Those requests reach real hosts. Only probe domains you own or are \
             explicitly authorized to test.",
        ),
        Line::from(""),
        Line::from("The author assumes NO liability for misuse of this program."),
        Line::from(""),
        Line::from(
            "Press ".bold() + "Enter".bold().yellow() + " to Acknowledge and Continue".bold(),
        ),
    ]);

    let block = Block::default()
        .title("Disclaimer")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let popup_area = centered_rect(60, 50, area);

    let popup = Paragraph::new(disclaimer_text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    // Clear first so the UI underneath does not bleed through.
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// A `Rect` of the given percentages, centered within `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
