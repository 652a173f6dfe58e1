//! Task creation form rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::theme;
use crate::app::{CreateForm, FormField};

/// Render the create form as a centered popup over the board.
pub fn render(frame: &mut Frame, area: Rect, form: &CreateForm) {
    let popup = centered_rect(60, 12, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" New task ", theme::highlighted()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(2), // description
            Constraint::Length(2), // due date
            Constraint::Length(2), // priority
            Constraint::Min(1),    // help
        ])
        .split(inner);

    render_field(frame, rows[0], "Title", &form.title, form.field == FormField::Title);
    render_field(
        frame,
        rows[1],
        "Description",
        &form.description,
        form.field == FormField::Description,
    );
    render_field(
        frame,
        rows[2],
        "Due (YYYY-MM-DD)",
        &form.due_date,
        form.field == FormField::DueDate,
    );

    let priority = Line::from(vec![
        Span::styled("Priority: ", theme::dimmed()),
        Span::styled(
            format!("{:?}", form.priority),
            theme::normal().fg(theme::priority_color(form.priority)),
        ),
        Span::styled("  (↑/↓ to change)", theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(priority), rows[3]);

    let help = Line::from(Span::styled(
        "Tab: next field | Enter: create | Esc: cancel",
        theme::dimmed(),
    ));
    frame.render_widget(Paragraph::new(help), rows[4]);
}

/// One labeled input row; the focused field shows a cursor block.
fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let label_style = if focused {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value.to_string(), theme::normal()),
    ];
    if focused {
        spans.push(Span::styled("▌", theme::highlighted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// A rect of the given size centered inside `area`.
fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
