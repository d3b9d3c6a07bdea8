//! Edit/Create form state
//!
//! Transient title/description fields, seeded from the task being edited or
//! blank for creation. A fresh state is constructed on every open, so stale
//! input from a previous edit never leaks into a new form. Submission is
//! rejected while the title is empty or whitespace-only; the form stays open
//! with an inline error.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldId {
    Title,
    Description,
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub id: EditorFieldId,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct EditorSubmit {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    fields: Vec<EditorField>,
    active: usize,
    error: Option<String>,
    task_id: Option<String>,
}

impl EditorState {
    pub fn new_task() -> Self {
        Self {
            kind: EditorKind::NewTask,
            fields: blank_fields(String::new(), String::new()),
            active: 0,
            error: None,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        Self {
            kind: EditorKind::EditTask,
            fields: blank_fields(task.title.clone(), task.description.clone()),
            active: 0,
            error: None,
            task_id: Some(task.id.clone()),
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            if let Some(field) = self.current_field_mut() {
                field.value.clear();
            }
            self.error = None;
            return EditorAction::None;
        }

        match key.code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.move_active(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_active(-1);
            }
            KeyCode::Enter => {
                if self.active + 1 >= self.fields.len() {
                    return self.attempt_submit();
                }
                self.move_active(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EditorAction::None;
                }
                if !ch.is_control() {
                    if let Some(field) = self.current_field_mut() {
                        field.value.push(ch);
                    }
                }
            }
            _ => {}
        }

        self.error = None;
        EditorAction::None
    }

    pub fn build_submit(&self) -> Result<EditorSubmit, String> {
        self.validate()?;
        Ok(EditorSubmit {
            title: self.field_value(EditorFieldId::Title).trim().to_string(),
            description: self.field_value(EditorFieldId::Description).to_string(),
        })
    }

    fn attempt_submit(&mut self) -> EditorAction {
        match self.validate() {
            Ok(()) => EditorAction::Submit,
            Err(err) => {
                self.error = Some(err);
                EditorAction::None
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.field_value(EditorFieldId::Title).trim().is_empty() {
            return Err("title is required".to_string());
        }
        Ok(())
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.fields.len() as isize;
        if len == 0 {
            self.active = 0;
            return;
        }
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut EditorField> {
        self.fields.get_mut(self.active)
    }

    fn field_value(&self, id: EditorFieldId) -> &str {
        self.fields
            .iter()
            .find(|field| field.id == id)
            .map(|field| field.value.as_str())
            .unwrap_or("")
    }
}

fn blank_fields(title: String, description: String) -> Vec<EditorField> {
    vec![
        EditorField {
            id: EditorFieldId::Title,
            label: "Title",
            value: title,
            required: true,
        },
        EditorField {
            id: EditorFieldId::Description,
            label: "Description",
            value: description,
            required: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(editor: &mut EditorState, text: &str) {
        for ch in text.chars() {
            editor.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn editor_requires_title() {
        let mut editor = EditorState::new_task();
        // Enter through every field without typing anything.
        for _ in 0..editor.fields().len() {
            let action = editor.handle_key(key(KeyCode::Enter));
            assert_eq!(action, EditorAction::None);
        }
        assert_eq!(editor.error(), Some("title is required"));
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let mut editor = EditorState::new_task();
        type_text(&mut editor, "   ");
        editor.handle_key(key(KeyCode::Enter));
        let action = editor.handle_key(key(KeyCode::Enter));
        assert_eq!(action, EditorAction::None);
        assert!(editor.error().is_some());
    }

    #[test]
    fn filled_title_submits_trimmed() {
        let mut editor = EditorState::new_task();
        type_text(&mut editor, " Write spec ");
        editor.handle_key(key(KeyCode::Enter));
        type_text(&mut editor, "details");
        let action = editor.handle_key(key(KeyCode::Enter));
        assert_eq!(action, EditorAction::Submit);

        let submit = editor.build_submit().unwrap();
        assert_eq!(submit.title, "Write spec");
        assert_eq!(submit.description, "details");
    }

    #[test]
    fn edit_seeds_from_task_and_keeps_its_id() {
        let task = Task {
            id: "t1".to_string(),
            title: "Original".to_string(),
            description: "text".to_string(),
            status: Status::Done,
        };
        let editor = EditorState::edit_task(&task);
        assert_eq!(editor.kind(), EditorKind::EditTask);
        assert_eq!(editor.task_id(), Some("t1"));
        assert_eq!(editor.fields()[0].value, "Original");
        assert_eq!(editor.fields()[1].value, "text");
    }

    #[test]
    fn new_task_form_starts_blank() {
        let editor = EditorState::new_task();
        assert_eq!(editor.kind(), EditorKind::NewTask);
        assert!(editor.task_id().is_none());
        assert!(editor.fields().iter().all(|field| field.value.is_empty()));
    }

    #[test]
    fn esc_cancels() {
        let mut editor = EditorState::new_task();
        assert_eq!(editor.handle_key(key(KeyCode::Esc)), EditorAction::Cancel);
    }

    #[test]
    fn ctrl_u_clears_active_field() {
        let mut editor = EditorState::new_task();
        type_text(&mut editor, "typo");
        editor.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(editor.fields()[0].value.is_empty());
    }
}
