//! Terminal UI rendering.

pub mod board;
pub mod create_form;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Screen};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Content on top, one-line status bar at the bottom.
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    match app.screen {
        Screen::Loading => {
            let message = Paragraph::new(Line::from(Span::styled(
                "Checking session…",
                theme::dimmed(),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(message, content_area);
        }
        Screen::SignedOut => {
            let message = Paragraph::new(vec![
                Line::from(Span::styled("No active session.", theme::bold())),
                Line::from(Span::styled(
                    "Provide an access token via --access-token or ZUDIO_ACCESS_TOKEN and restart.",
                    theme::dimmed(),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(message, content_area);
        }
        Screen::Board => {
            board::render(frame, content_area, app);
            if let Some(form) = &app.form {
                create_form::render(frame, content_area, form);
            }
        }
    }

    status_bar::render(frame, status_area, app);
}
