use serde::{Deserialize, Serialize};

/// A pending task. Descriptions are stored trimmed; the pending list never
/// holds two entries with the same description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub description: String,
}

/// A task moved out of the pending list. `completed_at` is a display string
/// in the user's locale format, not a machine timestamp; it serializes as
/// `completedAt` to match the on-disk lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTodo {
    pub description: String,
    pub completed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_todo_serializes_with_camel_case_timestamp() {
        let completed = CompletedTodo {
            description: "Pasear al perro".to_string(),
            completed_at: "2/1/2024, 15:04:05".to_string(),
        };
        let value = serde_json::to_value(&completed).expect("serialize completed todo");
        assert_eq!(
            value,
            serde_json::json!({
              "description": "Pasear al perro",
              "completedAt": "2/1/2024, 15:04:05"
            })
        );
    }

    #[test]
    fn stored_arrays_deserialize_as_typed_lists() {
        let todos: Vec<Todo> =
            serde_json::from_str(r#"[{"description":"Comprar leche"}]"#).expect("todo array");
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].description, "Comprar leche");

        let completed: Vec<CompletedTodo> = serde_json::from_str(
            r#"[{"description":"Comprar leche","completedAt":"1/1/2024, 09:00:00"}]"#,
        )
        .expect("completed array");
        assert_eq!(completed[0].completed_at, "1/1/2024, 09:00:00");
    }
}
