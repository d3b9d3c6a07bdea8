//! Board application loop
//!
//! Owns the task repository and all transient UI state: column/card
//! selection, the move session, the editor form, the delete confirmation,
//! and the suggestion modal. Every state slot is a named field here; nothing
//! is ambient. Repository mutations run synchronously on the UI turn and the
//! store is written on the same turn. Only the suggestion fetch leaves the
//! thread; its result comes back over a channel and is dropped when the
//! modal it was requested for is no longer showing.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::board::{columns, ColumnHover, DragSession};
use crate::error::Result;
use crate::repo::TaskRepository;
use crate::suggest::SuggestionClient;
use crate::task::{Status, Task};

use super::editor::{EditorAction, EditorKind, EditorState};
use super::view;

const EVENT_POLL_MS: u64 = 120;

enum UiMsg {
    Suggestions {
        task_id: String,
        result: std::result::Result<Vec<String>, String>,
    },
}

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: String,
    pub(crate) title: String,
}

pub(crate) enum SuggestionView {
    Loading,
    Ready(Vec<String>),
    Failed(String),
}

pub(crate) struct SuggestionModalState {
    pub(crate) task_id: String,
    pub(crate) task_title: String,
    pub(crate) view: SuggestionView,
}

pub struct AppState {
    pub(crate) repo: TaskRepository,
    pub(crate) selected_column: usize,
    pub(crate) selected_row: usize,
    pub(crate) drag: DragSession,
    pub(crate) drag_target: usize,
    pub(crate) hover: ColumnHover,
    pub(crate) editor: Option<EditorState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) suggestions: Option<SuggestionModalState>,
    pub(crate) status_message: Option<(String, StatusKind)>,
    suggest_client: SuggestionClient,
    tx: Sender<UiMsg>,
    should_quit: bool,
}

impl AppState {
    fn new(repo: TaskRepository, suggest_client: SuggestionClient, tx: Sender<UiMsg>) -> Self {
        Self {
            repo,
            selected_column: 0,
            selected_row: 0,
            drag: DragSession::default(),
            drag_target: 0,
            hover: ColumnHover::default(),
            editor: None,
            delete_confirm: None,
            suggestions: None,
            status_message: None,
            suggest_client,
            tx,
            should_quit: false,
        }
    }

    /// Task currently under the cursor, if the column is non-empty
    pub(crate) fn selected_task(&self) -> Option<&Task> {
        let cols = columns(self.repo.tasks());
        cols.get(self.selected_column)?
            .tasks
            .get(self.selected_row)
            .copied()
    }

    fn column_len(&self, column: usize) -> usize {
        columns(self.repo.tasks())
            .get(column)
            .map(|col| col.tasks.len())
            .unwrap_or(0)
    }

    fn clamp_selection(&mut self) {
        let len = self.column_len(self.selected_column);
        if len == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= len {
            self.selected_row = len - 1;
        }
    }

    fn set_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status_message = Some((message.into(), kind));
    }

    fn handle_msg(&mut self, msg: UiMsg) {
        match msg {
            UiMsg::Suggestions { task_id, result } => {
                // A result for a closed or retargeted modal is stale; drop it.
                let Some(modal) = self.suggestions.as_mut() else {
                    return;
                };
                if modal.task_id != task_id {
                    return;
                }
                modal.view = match result {
                    Ok(subtasks) => SuggestionView::Ready(subtasks),
                    Err(message) => SuggestionView::Failed(message),
                };
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        if self.editor.is_some() {
            self.handle_editor_key(key);
            return;
        }
        if self.delete_confirm.is_some() {
            self.handle_delete_confirm_key(key);
            return;
        }
        if self.suggestions.is_some() {
            self.handle_suggestions_key(key);
            return;
        }
        if self.drag.is_active() {
            self.handle_drag_key(key);
            return;
        }
        self.handle_board_key(key);
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < Status::ALL.len() {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row += 1;
                self.clamp_selection();
            }
            KeyCode::Char('a') => {
                self.editor = Some(EditorState::new_task());
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task().cloned() {
                    self.editor = Some(EditorState::edit_task(&task));
                }
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.selected_task() {
                    let confirm = DeleteConfirmState {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                    };
                    self.delete_confirm = Some(confirm);
                }
            }
            KeyCode::Char('s') => self.request_suggestions(),
            KeyCode::Char(' ') | KeyCode::Char('m') => {
                if let Some(task) = self.selected_task() {
                    let id = task.id.clone();
                    self.drag.start(id);
                    self.drag_target = self.selected_column;
                    self.hover.set_only(Status::ALL[self.drag_target]);
                }
            }
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                if self.drag_target > 0 {
                    self.drag_target -= 1;
                    self.hover.set_only(Status::ALL[self.drag_target]);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.drag_target + 1 < Status::ALL.len() {
                    self.drag_target += 1;
                    self.hover.set_only(Status::ALL[self.drag_target]);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') => {
                let target = Status::ALL[self.drag_target];
                if let Some((id, status)) = self.drag.drop_on(target) {
                    match self.repo.move_to(&id, status) {
                        Ok(true) => {
                            self.selected_column = self.drag_target;
                            self.selected_row =
                                self.column_len(self.selected_column).saturating_sub(1);
                            self.set_status(format!("Moved to {target}"), StatusKind::Info);
                        }
                        Ok(false) => {}
                        Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                    }
                }
                self.hover.clear();
                self.clamp_selection();
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.drag.cancel();
                self.hover.clear();
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(mut editor) = self.editor.take() else {
            return;
        };
        match editor.handle_key(key) {
            EditorAction::None => {
                self.editor = Some(editor);
            }
            EditorAction::Cancel => {}
            EditorAction::Submit => match editor.build_submit() {
                Ok(submit) => {
                    let result = match (editor.kind(), editor.task_id()) {
                        (EditorKind::EditTask, Some(id)) => self
                            .repo
                            .update(id, &submit.title, &submit.description)
                            .map(|_| ()),
                        _ => self
                            .repo
                            .create(&submit.title, &submit.description)
                            .map(|_| ()),
                    };
                    match result {
                        Ok(()) => self.clamp_selection(),
                        Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                    }
                }
                Err(message) => {
                    editor.set_error(message);
                    self.editor = Some(editor);
                }
            },
        }
    }

    fn handle_delete_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                if let Some(confirm) = self.delete_confirm.take() {
                    match self.repo.delete(&confirm.task_id) {
                        Ok(_) => self.clamp_selection(),
                        Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                    }
                }
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
                self.delete_confirm = None;
            }
            _ => {}
        }
    }

    fn handle_suggestions_key(&mut self, key: KeyEvent) {
        // Closing before the response arrives just discards the result.
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.suggestions = None;
        }
    }

    fn request_suggestions(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let task_id = task.id.clone();
        let title = task.title.clone();
        let description = task.description.clone();

        self.suggestions = Some(SuggestionModalState {
            task_id: task_id.clone(),
            task_title: title.clone(),
            view: SuggestionView::Loading,
        });

        let client = self.suggest_client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime
                    .block_on(client.generate_subtasks(&title, &description))
                    .map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            };
            let _ = tx.send(UiMsg::Suggestions { task_id, result });
        });
    }
}

/// Run the board TUI until the user quits.
pub fn run(repo: TaskRepository, suggest_client: SuggestionClient) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, repo, suggest_client);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    repo: TaskRepository,
    suggest_client: SuggestionClient,
) -> Result<()> {
    let (tx, rx): (Sender<UiMsg>, Receiver<UiMsg>) = mpsc::channel();
    let mut app = AppState::new(repo, suggest_client, tx);

    while !app.should_quit {
        terminal.draw(|frame| view::render(frame, &mut app))?;

        while let Ok(msg) = rx.try_recv() {
            app.handle_msg(msg);
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
