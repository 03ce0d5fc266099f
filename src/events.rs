use crate::models::{CompletedTodo, Todo};

pub const EVENT_STATE_UPDATED: &str = "state_updated";

/// Full state snapshot pushed to the webview after every mutation. Field
/// names follow the stored-list convention (`completedTodos`).
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePayload {
    pub todolist: Vec<Todo>,
    pub completed_todos: Vec<CompletedTodo>,
    pub draft: String,
}
