use std::path::PathBuf;

use crate::events::StatePayload;
#[cfg(all(feature = "app", not(test)))]
use crate::events::EVENT_STATE_UPDATED;
use crate::models::{CompletedTodo, Todo};
use crate::state::TodoState;
use crate::storage::{Storage, StorageError, COMPLETED_KEY, TODOLIST_KEY};
use crate::timefmt;

#[cfg(all(feature = "app", not(test)))]
use tauri::{AppHandle, Emitter, Manager, Runtime, State};

#[derive(Debug, serde::Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

trait CommandCtx {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError>;
    fn emit_state_updated(&self, payload: StatePayload);
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

fn err<T>(message: &str) -> CommandResult<T> {
    CommandResult {
        ok: false,
        data: None,
        error: Some(message.to_string()),
    }
}

/// Write-through after a successful mutation: both lists go out under their
/// fixed keys, then the webview gets the fresh snapshot. A storage failure is
/// logged and swallowed; the in-memory state stays authoritative for the
/// session, so the command itself still succeeds.
fn persist(ctx: &impl CommandCtx, state: &TodoState) {
    if let Err(error) = try_persist(ctx, state) {
        log::error!("storage: failed to persist lists: {error}");
    }
    ctx.emit_state_updated(state.payload());
}

fn try_persist(ctx: &impl CommandCtx, state: &TodoState) -> Result<(), StorageError> {
    let storage = Storage::new(ctx.app_data_dir()?);
    storage.ensure_dirs()?;
    storage.write_list(TODOLIST_KEY, &state.todolist())?;
    storage.write_list(COMPLETED_KEY, &state.completed_todos())?;
    Ok(())
}

/// Loads both lists from storage into the state. Unreadable or malformed
/// keys fall back to empty lists inside `read_list`, so this never fails.
fn load_state_impl(ctx: &impl CommandCtx, state: &TodoState) -> CommandResult<StatePayload> {
    let root = match ctx.app_data_dir() {
        Ok(path) => path,
        Err(error) => {
            log::error!("storage: app_data_dir unavailable: {error}");
            return ok(state.payload());
        }
    };
    let storage = Storage::new(root);
    let todolist = storage.read_list(TODOLIST_KEY);
    let completed = storage.read_list(COMPLETED_KEY);
    log::debug!(
        "load_state: {} pending, {} completed",
        todolist.len(),
        completed.len()
    );
    state.replace(todolist, completed);
    ok(state.payload())
}

fn set_draft_impl(state: &TodoState, text: String) -> CommandResult<bool> {
    state.set_draft(text);
    ok(true)
}

fn add_todo_impl(
    ctx: &impl CommandCtx,
    state: &TodoState,
    description: String,
) -> CommandResult<Todo> {
    let todo = match state.add(&description) {
        Ok(todo) => todo,
        Err(error) => return err(&error.to_string()),
    };
    persist(ctx, state);
    ok(todo)
}

fn delete_todo_impl(ctx: &impl CommandCtx, state: &TodoState, index: usize) -> CommandResult<bool> {
    if let Err(error) = state.remove(index) {
        return err(&error.to_string());
    }
    persist(ctx, state);
    ok(true)
}

/// Delete-and-repopulate: the removed description lands in the draft so the
/// input field can pick it up from the next state payload.
fn edit_todo_impl(ctx: &impl CommandCtx, state: &TodoState, index: usize) -> CommandResult<String> {
    let todo = match state.edit(index) {
        Ok(todo) => todo,
        Err(error) => return err(&error.to_string()),
    };
    persist(ctx, state);
    ok(todo.description)
}

fn complete_todo_impl(
    ctx: &impl CommandCtx,
    state: &TodoState,
    index: usize,
) -> CommandResult<CompletedTodo> {
    let completed = match state.complete(index, timefmt::completion_timestamp()) {
        Ok(completed) => completed,
        Err(error) => return err(&error.to_string()),
    };
    persist(ctx, state);
    ok(completed)
}

/// Empties both lists and wipes every persisted key. The store ends up
/// empty, not holding two empty arrays.
fn clear_all_impl(ctx: &impl CommandCtx, state: &TodoState) -> CommandResult<bool> {
    state.clear();
    match ctx.app_data_dir() {
        Ok(root) => {
            if let Err(error) = Storage::new(root).clear() {
                log::error!("storage: failed to clear persisted keys: {error}");
            }
        }
        Err(error) => log::error!("storage: app_data_dir unavailable: {error}"),
    }
    ctx.emit_state_updated(state.payload());
    ok(true)
}

#[cfg(all(feature = "app", not(test)))]
struct TauriCommandCtx<'a, R: Runtime> {
    app: &'a AppHandle<R>,
}

#[cfg(all(feature = "app", not(test)))]
impl<R: Runtime> CommandCtx for TauriCommandCtx<'_, R> {
    fn app_data_dir(&self) -> Result<PathBuf, StorageError> {
        self.app
            .path()
            .app_data_dir()
            .map_err(|err| StorageError::Io(std::io::Error::other(err.to_string())))
    }

    fn emit_state_updated(&self, payload: StatePayload) {
        let _ = self.app.emit(EVENT_STATE_UPDATED, payload);
    }
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn load_state(app: AppHandle, state: State<TodoState>) -> CommandResult<StatePayload> {
    let ctx = TauriCommandCtx { app: &app };
    load_state_impl(&ctx, state.inner())
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn set_draft(state: State<TodoState>, text: String) -> CommandResult<bool> {
    set_draft_impl(state.inner(), text)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn add_todo(
    app: AppHandle,
    state: State<TodoState>,
    description: String,
) -> CommandResult<Todo> {
    let ctx = TauriCommandCtx { app: &app };
    add_todo_impl(&ctx, state.inner(), description)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn delete_todo(app: AppHandle, state: State<TodoState>, index: usize) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    delete_todo_impl(&ctx, state.inner(), index)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn edit_todo(app: AppHandle, state: State<TodoState>, index: usize) -> CommandResult<String> {
    let ctx = TauriCommandCtx { app: &app };
    edit_todo_impl(&ctx, state.inner(), index)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn complete_todo(
    app: AppHandle,
    state: State<TodoState>,
    index: usize,
) -> CommandResult<CompletedTodo> {
    let ctx = TauriCommandCtx { app: &app };
    complete_todo_impl(&ctx, state.inner(), index)
}

#[cfg(all(feature = "app", not(test)))]
#[tauri::command]
pub fn clear_all(app: AppHandle, state: State<TodoState>) -> CommandResult<bool> {
    let ctx = TauriCommandCtx { app: &app };
    clear_all_impl(&ctx, state.inner())
}
