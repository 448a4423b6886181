//! Modal editor for creating and editing tasks
//!
//! The editor holds a short-lived per-field draft, reset every time
//! the modal opens. Submit validates the draft and hands a
//! `TaskDraft` back to the store; the modal itself never talks to the
//! transport.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::{Task, TaskDraft};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    NewTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFieldId {
    Name,
    Description,
    DueDate,
}

#[derive(Debug, Clone)]
pub struct EditorField {
    pub id: EditorFieldId,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Cancel,
    Submit,
}

/// Editor state: three text fields plus, in edit mode, a completed
/// checkbox as the final row.
#[derive(Debug, Clone)]
pub struct EditorState {
    kind: EditorKind,
    fields: Vec<EditorField>,
    completed: bool,
    show_completed: bool,
    active: usize,
    error: Option<String>,
    task_id: Option<i64>,
}

impl EditorState {
    pub fn new_task() -> Self {
        Self {
            kind: EditorKind::NewTask,
            fields: blank_fields(),
            completed: false,
            show_completed: false,
            active: 0,
            error: None,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        let mut fields = blank_fields();
        for field in &mut fields {
            field.value = match field.id {
                EditorFieldId::Name => task.name.clone(),
                EditorFieldId::Description => task.description.clone(),
                EditorFieldId::DueDate => task.due_date.format(DATE_FORMAT).to_string(),
            };
        }
        Self {
            kind: EditorKind::EditTask,
            fields,
            completed: task.completed,
            show_completed: true,
            active: 0,
            error: None,
            task_id: task.id,
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn task_id(&self) -> Option<i64> {
        self.task_id
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

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn has_completed_row(&self) -> bool {
        self.show_completed
    }

    /// Total navigable rows (text fields plus the optional checkbox).
    pub fn row_count(&self) -> usize {
        self.fields.len() + usize::from(self.show_completed)
    }

    pub fn on_completed_row(&self) -> bool {
        self.show_completed && self.active == self.fields.len()
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
                if self.active + 1 >= self.row_count() {
                    return self.attempt_submit();
                }
                self.move_active(1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(' ') if self.on_completed_row() => {
                self.completed = !self.completed;
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

    /// Validate the draft and produce the request body.
    pub fn build_submit(&self) -> Result<TaskDraft, String> {
        let name = self.field_value(EditorFieldId::Name).trim().to_string();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        let description = self
            .field_value(EditorFieldId::Description)
            .trim()
            .to_string();
        if description.is_empty() {
            return Err("description is required".to_string());
        }
        let raw_date = self.field_value(EditorFieldId::DueDate).trim().to_string();
        if raw_date.is_empty() {
            return Err("due date is required".to_string());
        }
        let due_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .map_err(|_| "due date must be YYYY-MM-DD".to_string())?;

        Ok(TaskDraft {
            name,
            description,
            due_date,
            completed: self.completed,
        })
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn attempt_submit(&mut self) -> EditorAction {
        match self.build_submit() {
            Ok(_) => EditorAction::Submit,
            Err(err) => {
                self.error = Some(err);
                EditorAction::None
            }
        }
    }

    fn move_active(&mut self, delta: isize) {
        let len = self.row_count() as isize;
        if len == 0 {
            self.active = 0;
            return;
        }
        let next = (self.active as isize + delta).rem_euclid(len);
        self.active = next as usize;
    }

    fn current_field_mut(&mut self) -> Option<&mut EditorField> {
        if self.on_completed_row() {
            return None;
        }
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

fn blank_fields() -> Vec<EditorField> {
    vec![
        EditorField {
            id: EditorFieldId::Name,
            label: "Name",
            value: String::new(),
        },
        EditorField {
            id: EditorFieldId::Description,
            label: "Description",
            value: String::new(),
        },
        EditorField {
            id: EditorFieldId::DueDate,
            label: "Due date",
            value: String::new(),
        },
    ]
}
