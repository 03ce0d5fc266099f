// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/
mod commands;
mod events;
mod logging;
mod models;
mod state;
mod storage;
mod timefmt;

#[cfg(all(feature = "app", not(test)))]
use tauri::Manager;

#[cfg(all(feature = "app", not(test)))]
use crate::commands::*;
#[cfg(all(feature = "app", not(test)))]
use crate::state::TodoState;
#[cfg(all(feature = "app", not(test)))]
use crate::storage::Storage;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
#[cfg(all(feature = "app", not(test)))]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            if let Err(error) = logging::init_logging(&data_dir) {
                eprintln!("failed to initialize logging: {error}");
            }

            let storage = Storage::new(data_dir);
            storage.ensure_dirs()?;
            let todolist = storage.read_list(storage::TODOLIST_KEY);
            let completed = storage.read_list(storage::COMPLETED_KEY);
            log::info!(
                "startup: {} pending, {} completed",
                todolist.len(),
                completed.len()
            );

            app.manage(TodoState::new(todolist, completed));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            load_state,
            set_draft,
            add_todo,
            delete_todo,
            edit_todo,
            complete_todo,
            clear_all,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
