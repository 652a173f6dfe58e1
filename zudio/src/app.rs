//! Application state and event handling.
//!
//! `App` is the shell: it gates between the loading, signed-out, and board
//! screens based on session state, holds the display mirror of the task
//! list, and turns key presses into [`StoreCommand`]s for the store worker.

use chrono::{NaiveDate, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use zudio_types::{NewTask, Task, TaskId, TaskPatch, TaskPriority, User};

use crate::board::{self, BoardColumn};
use crate::remote::{StoreCommand, StoreEvent};

/// Which screen the shell is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Session initialization has not resolved yet.
    Loading,
    /// No session; the user must supply an access token and restart.
    SignedOut,
    /// The kanban board.
    Board,
}

/// Which create-form field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Task title (required).
    Title,
    /// Optional description.
    Description,
    /// Optional due date, entered as `YYYY-MM-DD`.
    DueDate,
}

impl FormField {
    /// Cycle to the next field: title -> description -> due date -> title.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::DueDate,
            Self::DueDate => Self::Title,
        }
    }
}

/// State of the task creation form.
#[derive(Debug, Clone)]
pub struct CreateForm {
    /// Title input buffer.
    pub title: String,
    /// Description input buffer.
    pub description: String,
    /// Due date input buffer (`YYYY-MM-DD` or empty).
    pub due_date: String,
    /// Selected priority, cycled with Up/Down.
    pub priority: TaskPriority,
    /// Which field has focus.
    pub field: FormField,
}

impl CreateForm {
    fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            priority: TaskPriority::Medium,
            field: FormField::Title,
        }
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::DueDate => &mut self.due_date,
        }
    }
}

/// A status-line message.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Message text.
    pub text: String,
    /// Whether this is an error (styled differently).
    pub is_error: bool,
}

/// Main application state.
pub struct App {
    /// Current screen.
    pub screen: Screen,
    /// Signed-in user, once the session resolves.
    pub user: Option<User>,
    /// Display mirror of the task list (fed by [`StoreEvent::TasksChanged`]).
    pub tasks: Vec<Task>,
    /// Whether a fetch is in flight.
    pub fetching: bool,
    /// Selected board column index.
    pub selected_column: usize,
    /// Selected task index within the column.
    pub selected_task: usize,
    /// Open create form, if any.
    pub form: Option<CreateForm>,
    /// Last notice for the status bar.
    pub notice: Option<Notice>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Due date display format (chrono format string).
    pub date_format: String,
}

impl App {
    /// Creates the shell in the loading state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Loading,
            user: None,
            tasks: Vec::new(),
            fetching: false,
            selected_column: 0,
            selected_task: 0,
            form: None,
            notice: None,
            should_quit: false,
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    /// Sets the due date display format.
    #[must_use]
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// The board columns for the current task list.
    #[must_use]
    pub fn columns(&self) -> Vec<BoardColumn<'_>> {
        board::group_by_status(&self.tasks)
    }

    /// Id of the currently selected task, if the selection points at one.
    #[must_use]
    pub fn selected_task_id(&self) -> Option<TaskId> {
        let columns = self.columns();
        let column = columns.get(self.selected_column)?;
        column.tasks.get(self.selected_task).map(|t| t.id)
    }

    /// Applies a store event to the shell state.
    ///
    /// Returns a follow-up command when the event calls for one: resolving
    /// an authenticated session kicks off the first fetch, mirroring the
    /// dashboard's fetch-on-mount.
    pub fn apply_event(&mut self, event: StoreEvent) -> Option<StoreCommand> {
        match event {
            StoreEvent::SessionResolved { user: Some(user) } => {
                self.user = Some(user);
                self.screen = Screen::Board;
                Some(StoreCommand::FetchTasks)
            }
            StoreEvent::SessionResolved { user: None } => {
                self.screen = Screen::SignedOut;
                None
            }
            StoreEvent::FetchStarted => {
                self.fetching = true;
                None
            }
            StoreEvent::TasksChanged { tasks } => {
                self.tasks = tasks;
                self.fetching = false;
                self.clamp_selection();
                None
            }
            StoreEvent::SignedOut => {
                self.user = None;
                self.tasks.clear();
                self.screen = Screen::SignedOut;
                None
            }
            StoreEvent::Notice(text) => {
                self.notice = Some(Notice {
                    text,
                    is_error: false,
                });
                None
            }
            StoreEvent::Error(text) => {
                self.fetching = false;
                self.notice = Some(Notice {
                    text,
                    is_error: true,
                });
                None
            }
        }
    }

    /// Handles a key event, returning a command for the store worker when
    /// the action needs a remote call.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        // Global shortcut.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.screen {
            Screen::Loading | Screen::SignedOut => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
                None
            }
            Screen::Board => {
                if self.form.is_some() {
                    self.handle_form_key(key)
                } else {
                    self.handle_board_key(key)
                }
            }
        }
    }

    /// Key handling on the board.
    fn handle_board_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('n') => {
                self.form = Some(CreateForm::new());
                None
            }
            KeyCode::Char('r') => Some(StoreCommand::FetchTasks),
            KeyCode::Char('S') => Some(StoreCommand::SignOut),
            KeyCode::Left | KeyCode::Char('h') => {
                self.prev_column();
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.next_column();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_task = self.selected_task.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next_task();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.cycle_selected_status(),
            _ => None,
        }
    }

    /// Key handling while the create form is open.
    fn handle_form_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        let form = self.form.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                None
            }
            KeyCode::Tab => {
                form.field = form.field.next();
                None
            }
            KeyCode::Up => {
                // Three steps forward in a four-cycle is one step back.
                form.priority = form.priority.next().next().next();
                None
            }
            KeyCode::Down => {
                form.priority = form.priority.next();
                None
            }
            KeyCode::Char(c) => {
                form.focused_buffer().push(c);
                None
            }
            KeyCode::Backspace => {
                form.focused_buffer().pop();
                None
            }
            KeyCode::Enter => self.submit_form(),
            _ => None,
        }
    }

    /// Validates the form and turns it into a create command.
    fn submit_form(&mut self) -> Option<StoreCommand> {
        let form = self.form.as_ref()?;
        if form.title.trim().is_empty() {
            self.notice = Some(Notice {
                text: "Title cannot be empty".to_string(),
                is_error: true,
            });
            return None;
        }

        let due_date = if form.due_date.trim().is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(form.due_date.trim(), "%Y-%m-%d") {
                Ok(date) => date
                    .and_hms_opt(0, 0, 0)
                    .map(|dt| Utc.from_utc_datetime(&dt)),
                Err(_) => {
                    self.notice = Some(Notice {
                        text: "Due date must be YYYY-MM-DD".to_string(),
                        is_error: true,
                    });
                    return None;
                }
            }
        };

        let new = NewTask {
            title: form.title.trim().to_string(),
            description: if form.description.trim().is_empty() {
                None
            } else {
                Some(form.description.trim().to_string())
            },
            priority: Some(form.priority),
            due_date,
            ..NewTask::default()
        };
        self.form = None;
        Some(StoreCommand::CreateTask(new))
    }

    /// Cycles the selected task's status and emits the patch command.
    fn cycle_selected_status(&mut self) -> Option<StoreCommand> {
        let id = self.selected_task_id()?;
        let task = self.tasks.iter().find(|t| t.id == id)?;
        Some(StoreCommand::UpdateTask {
            id,
            patch: TaskPatch::status(task.status.next()),
        })
    }

    /// Selects the previous column, resetting the task cursor.
    fn prev_column(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
            self.selected_task = 0;
        }
    }

    /// Selects the next column, resetting the task cursor.
    fn next_column(&mut self) {
        if self.selected_column + 1 < self.columns().len() {
            self.selected_column += 1;
            self.selected_task = 0;
        }
    }

    /// Moves the task cursor down within the column.
    fn next_task(&mut self) {
        let columns = self.columns();
        if let Some(column) = columns.get(self.selected_column) {
            self.selected_task = (self.selected_task + 1).min(column.tasks.len().saturating_sub(1));
        }
    }

    /// Keeps the selection inside the board after the task list changed.
    fn clamp_selection(&mut self) {
        let num_columns = self.columns().len();
        self.selected_column = self.selected_column.min(num_columns.saturating_sub(1));
        let len = self
            .columns()
            .get(self.selected_column)
            .map_or(0, |c| c.tasks.len());
        self.selected_task = self.selected_task.min(len.saturating_sub(1));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
