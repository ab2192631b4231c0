// src/ui/widgets/footer.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::new().bold().fg(Color::Yellow));

    let spans = if app.show_disclaimer {
        Line::from(vec![Span::raw("Press "), key("Enter"), Span::raw(" to continue.")])
    } else {
        match app.state {
            AppState::Idle => Line::from(vec![
                Span::raw("Press "),
                key("Enter"),
                Span::raw(" to scan, "),
                key("Esc"),
                Span::raw(" to quit."),
            ]),
            AppState::Finished => Line::from(vec![
                key("[N]"),
                Span::raw("ew Scan, "),
                key("↑ ↓"),
                Span::raw(" Scroll, "),
                key("[Q]"),
                Span::raw("uit"),
            ]),
            AppState::Scanning => Line::from(vec![
                Span::raw("Probing... "),
                key("↑ ↓"),
                Span::raw(" Scroll, "),
                key("[Q]"),
                Span::raw("uit"),
            ]),
        }
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
