//! Kanban board rendering.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use zudio_types::Task;

use super::theme;
use crate::app::App;
use crate::board::{self, BoardColumn};

/// Render the board: one bordered column per status, side by side.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let columns = app.columns();
    #[allow(clippy::cast_possible_truncation)]
    let width = 100 / columns.len().max(1) as u16;
    let constraints: Vec<Constraint> = columns
        .iter()
        .map(|_| Constraint::Percentage(width))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, column) in columns.iter().enumerate() {
        render_column(frame, chunks[i], app, column, i == app.selected_column);
    }
}

/// Render one status column with its task cards.
fn render_column(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    column: &BoardColumn<'_>,
    focused: bool,
) {
    let now = Utc::now();
    let items: Vec<ListItem> = column
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            task_card(
                task,
                focused && i == app.selected_task,
                now,
                &app.date_format,
            )
        })
        .collect();

    let title = format!(" {} ({}) ", column.status.label(), column.tasks.len());
    let border_style = if focused {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            theme::column_title(theme::status_color(column.status)),
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// One task card: a priority badge, the title, and a due date line.
fn task_card<'a>(
    task: &'a Task,
    selected: bool,
    now: chrono::DateTime<Utc>,
    date_format: &str,
) -> ListItem<'a> {
    let title_style = if selected {
        theme::selected()
    } else {
        theme::normal()
    };

    let mut title_line = vec![
        Span::styled(
            format!("[{:?}]", task.priority),
            theme::normal().fg(theme::priority_color(task.priority)),
        ),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
    ];
    if board::is_overdue(task, now) {
        title_line.push(Span::raw(" "));
        title_line.push(Span::styled("!", theme::normal().fg(theme::OVERDUE)));
    }

    let mut lines = vec![Line::from(title_line)];
    if let Some(description) = &task.description {
        lines.push(Line::from(Span::styled(
            format!("  {description}"),
            theme::dimmed(),
        )));
    }
    if let Some(due) = task.due_date {
        lines.push(Line::from(Span::styled(
            format!("  due {}", due.format(date_format)),
            theme::dimmed(),
        )));
    }

    ListItem::new(lines)
}
