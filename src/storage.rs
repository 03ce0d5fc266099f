use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub const TODOLIST_KEY: &str = "todolist";
pub const COMPLETED_KEY: &str = "completedTodos";

const KEY_SUFFIX: &str = "json";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "io error: {err}"),
            StorageError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        StorageError::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        StorageError::Json(value)
    }
}

/// String key-value store over the app data directory, one JSON document per
/// key. The desktop stand-in for browser local storage: `get`/`set`/`clear`
/// plus typed list accessors over the same keys.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{KEY_SUFFIX}"))
    }

    /// Raw read of a key; `Ok(None)` when the key was never written.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut file = match File::open(self.key_path(key)) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let mut buf = String::new();
        file.read_to_string(&mut buf)?;
        Ok(Some(buf))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_atomic(self.key_path(key), value.as_bytes())
    }

    /// Removes every stored key, like `localStorage.clear()`. Log files and
    /// other non-key entries in the data directory are left alone.
    pub fn clear(&self) -> Result<(), StorageError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(KEY_SUFFIX) {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Typed reader for a stored list. A missing key yields the empty list;
    /// an unreadable key or one whose content does not deserialize as an
    /// array of `T` is logged and also yields the empty list, so a corrupt
    /// store never takes the app down.
    pub fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::error!("storage: failed to read key={key}: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                log::warn!("storage: value for key={key} is not a valid list: {err}");
                Vec::new()
            }
        }
    }

    pub fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items)?;
        self.set(key, &json)
    }

    fn write_atomic(&self, path: PathBuf, bytes: &[u8]) -> Result<(), StorageError> {
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompletedTodo, Todo};

    fn storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        storage.ensure_dirs().unwrap();
        (dir, storage)
    }

    fn todos(descriptions: &[&str]) -> Vec<Todo> {
        descriptions
            .iter()
            .map(|description| Todo {
                description: description.to_string(),
            })
            .collect()
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let (_dir, storage) = storage();
        assert_eq!(storage.get(TODOLIST_KEY).unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips_and_leaves_no_temp_file() {
        let (dir, storage) = storage();
        storage.set(TODOLIST_KEY, r#"[{"description":"a"}]"#).unwrap();
        assert_eq!(
            storage.get(TODOLIST_KEY).unwrap().as_deref(),
            Some(r#"[{"description":"a"}]"#)
        );
        assert!(!dir.path().join("todolist.tmp").exists());
    }

    #[test]
    fn write_list_then_read_list_reproduces_the_ordered_list() {
        let (_dir, storage) = storage();
        let list = todos(&["Pasear al perro", "Comprar leche"]);
        storage.write_list(TODOLIST_KEY, &list).unwrap();

        let reloaded: Vec<Todo> = storage.read_list(TODOLIST_KEY);
        assert_eq!(reloaded, list);

        let completed = vec![CompletedTodo {
            description: "Comprar leche".to_string(),
            completed_at: "1/1/2024, 09:00:00".to_string(),
        }];
        storage.write_list(COMPLETED_KEY, &completed).unwrap();
        let reloaded: Vec<CompletedTodo> = storage.read_list(COMPLETED_KEY);
        assert_eq!(reloaded, completed);
    }

    #[test]
    fn read_list_defaults_to_empty_on_missing_malformed_or_non_array_content() {
        let (_dir, storage) = storage();

        let missing: Vec<Todo> = storage.read_list(TODOLIST_KEY);
        assert!(missing.is_empty());

        storage.set(TODOLIST_KEY, "not json at all").unwrap();
        let malformed: Vec<Todo> = storage.read_list(TODOLIST_KEY);
        assert!(malformed.is_empty());

        storage.set(TODOLIST_KEY, r#"{"description":"a"}"#).unwrap();
        let non_array: Vec<Todo> = storage.read_list(TODOLIST_KEY);
        assert!(non_array.is_empty());
    }

    #[test]
    fn clear_removes_stored_keys_but_not_other_files() {
        let (dir, storage) = storage();
        storage.set(TODOLIST_KEY, "[]").unwrap();
        storage.set(COMPLETED_KEY, "[]").unwrap();
        std::fs::write(dir.path().join("gestor.log"), b"log line").unwrap();

        storage.clear().unwrap();
        assert_eq!(storage.get(TODOLIST_KEY).unwrap(), None);
        assert_eq!(storage.get(COMPLETED_KEY).unwrap(), None);
        assert!(dir.path().join("gestor.log").exists());
    }

    #[test]
    fn clear_on_a_never_created_root_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("does-not-exist"));
        storage.clear().unwrap();
    }
}
