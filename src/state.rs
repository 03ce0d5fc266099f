use std::sync::{Arc, Mutex};

use crate::events::StatePayload;
use crate::models::{CompletedTodo, Todo};

/// Rejected transition. The `Display` strings are the user-visible alert
/// texts shown by the frontend, hence Spanish.
#[derive(Debug, PartialEq)]
pub enum TodoError {
    EmptyDescription,
    DuplicateDescription,
    IndexOutOfRange,
}

impl std::fmt::Display for TodoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoError::EmptyDescription => {
                write!(f, "¡La descripción del todo no puede estar vacía!")
            }
            TodoError::DuplicateDescription => write!(f, "¡Esta tarea ya existe en la lista!"),
            TodoError::IndexOutOfRange => write!(f, "La tarea seleccionada ya no existe."),
        }
    }
}

impl std::error::Error for TodoError {}

/// In-memory application state: the pending list (newest first), the
/// completed list (oldest first) and the draft backing the new-todo input.
/// Every transition validates before mutating, so a failed call leaves the
/// state untouched.
#[derive(Clone)]
pub struct TodoState {
    inner: Arc<Mutex<TodoData>>,
}

#[derive(Debug, Default)]
struct TodoData {
    todolist: Vec<Todo>,
    completed: Vec<CompletedTodo>,
    draft: String,
}

impl TodoState {
    pub fn new(todolist: Vec<Todo>, completed: Vec<CompletedTodo>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TodoData {
                todolist,
                completed,
                draft: String::new(),
            })),
        }
    }

    pub fn todolist(&self) -> Vec<Todo> {
        let guard = self.inner.lock().expect("state poisoned");
        guard.todolist.clone()
    }

    pub fn completed_todos(&self) -> Vec<CompletedTodo> {
        let guard = self.inner.lock().expect("state poisoned");
        guard.completed.clone()
    }

    pub fn draft(&self) -> String {
        let guard = self.inner.lock().expect("state poisoned");
        guard.draft.clone()
    }

    pub fn payload(&self) -> StatePayload {
        let guard = self.inner.lock().expect("state poisoned");
        StatePayload {
            todolist: guard.todolist.clone(),
            completed_todos: guard.completed.clone(),
            draft: guard.draft.clone(),
        }
    }

    /// Wholesale replacement of both lists, used when (re)loading from
    /// storage. The draft is left alone.
    pub fn replace(&self, todolist: Vec<Todo>, completed: Vec<CompletedTodo>) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.todolist = todolist;
        guard.completed = completed;
    }

    pub fn set_draft(&self, text: String) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.draft = text;
    }

    /// Prepends a todo with the trimmed description and clears the draft.
    /// Rejects empty and duplicate descriptions without touching the list.
    pub fn add(&self, description: &str) -> Result<Todo, TodoError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TodoError::EmptyDescription);
        }
        let mut guard = self.inner.lock().expect("state poisoned");
        if guard
            .todolist
            .iter()
            .any(|todo| todo.description == description)
        {
            return Err(TodoError::DuplicateDescription);
        }
        let todo = Todo {
            description: description.to_string(),
        };
        // Newest first.
        guard.todolist.insert(0, todo.clone());
        guard.draft.clear();
        Ok(todo)
    }

    pub fn remove(&self, index: usize) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("state poisoned");
        if index >= guard.todolist.len() {
            return Err(TodoError::IndexOutOfRange);
        }
        Ok(guard.todolist.remove(index))
    }

    /// Removes the todo at `index` and moves its description into the draft
    /// so the input field can repopulate. There is no restore on cancel.
    pub fn edit(&self, index: usize) -> Result<Todo, TodoError> {
        let mut guard = self.inner.lock().expect("state poisoned");
        if index >= guard.todolist.len() {
            return Err(TodoError::IndexOutOfRange);
        }
        let todo = guard.todolist.remove(index);
        guard.draft = todo.description.clone();
        Ok(todo)
    }

    /// Moves the todo at `index` to the end of the completed list, stamped
    /// with the supplied display timestamp.
    pub fn complete(&self, index: usize, completed_at: String) -> Result<CompletedTodo, TodoError> {
        let mut guard = self.inner.lock().expect("state poisoned");
        if index >= guard.todolist.len() {
            return Err(TodoError::IndexOutOfRange);
        }
        let todo = guard.todolist.remove(index);
        let completed = CompletedTodo {
            description: todo.description,
            completed_at,
        };
        // Oldest first.
        guard.completed.push(completed.clone());
        Ok(completed)
    }

    /// Empties both lists and the draft.
    pub fn clear(&self) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.todolist.clear();
        guard.completed.clear();
        guard.draft.clear();
    }
}
