//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Screen};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.screen {
        Screen::Loading | Screen::SignedOut => "q: quit",
        Screen::Board if app.form.is_some() => "Tab: next field | Enter: create | Esc: cancel",
        Screen::Board => {
            "←→/hl: column | ↑↓/jk: task | Enter: cycle status | n: new | r: refresh | S: sign out | q: quit"
        }
    };

    let who = app
        .user
        .as_ref()
        .map_or_else(|| "signed out".to_string(), |u| u.display_name().to_string());

    let mut spans = vec![
        Span::styled("Zudio", theme::bold()),
        Span::raw(" | "),
        Span::styled(who, theme::normal().fg(theme::SUCCESS)),
        Span::raw(" | "),
    ];

    if app.fetching {
        spans.push(Span::styled("fetching…", theme::dimmed()));
        spans.push(Span::raw(" | "));
    }

    if let Some(notice) = &app.notice {
        let style = if notice.is_error {
            theme::error_notice()
        } else {
            theme::normal().fg(theme::SUCCESS)
        };
        spans.push(Span::styled(notice.text.clone(), style));
        spans.push(Span::raw(" | "));
    }

    spans.push(Span::styled(help_text, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
