use crate::models::{ItemSelector, TodoItem};
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::{path::Path, path::PathBuf, sync::Arc};
use tokio::{fs, sync::Mutex};
use tracing::error;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TodoData {
    pub next_id: u64,
    /// Kept in ascending id order.
    pub todos: Vec<TodoItem>,
}

#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
    data: Arc<Mutex<TodoData>>,
}

impl FileStore {
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let data = load_data(&path).await;
        Ok(Self {
            path,
            data: Arc::new(Mutex::new(data)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Vec<TodoItem> {
        self.data.lock().await.todos.clone()
    }

    pub async fn insert(&self, text: String) -> Result<TodoItem, StoreError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        next.next_id = next.next_id.saturating_add(1);
        let item = TodoItem {
            id: format_id(next.next_id),
            text,
            completed: false,
        };
        next.todos.push(item.clone());

        persist_data(&self.path, &next).await?;
        *data = next;
        Ok(item)
    }

    pub async fn set_completed(
        &self,
        selector: &ItemSelector,
        completed: bool,
    ) -> Result<Option<TodoItem>, StoreError> {
        let mut data = self.data.lock().await;
        let Some(index) = newest_match(&data.todos, selector) else {
            return Ok(None);
        };
        let mut next = data.clone();
        next.todos[index].completed = completed;
        let updated = next.todos[index].clone();

        persist_data(&self.path, &next).await?;
        *data = next;
        Ok(Some(updated))
    }

    pub async fn delete(&self, selector: &ItemSelector) -> Result<Option<TodoItem>, StoreError> {
        let mut data = self.data.lock().await;
        let Some(index) = newest_match(&data.todos, selector) else {
            return Ok(None);
        };
        let mut next = data.clone();
        let removed = next.todos.remove(index);

        persist_data(&self.path, &next).await?;
        *data = next;
        Ok(Some(removed))
    }
}

fn newest_match(todos: &[TodoItem], selector: &ItemSelector) -> Option<usize> {
    todos.iter().rposition(|todo| selector.matches(todo))
}

/// Same width as a Mongo ObjectId so ids order lexically.
fn format_id(seq: u64) -> String {
    format!("{seq:024x}")
}

pub async fn load_data(path: &Path) -> TodoData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                TodoData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => TodoData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            TodoData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &TodoData) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_data_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("todo_app_{name}_{}_{}.json", std::process::id(), nanos));
        path
    }

    fn remaining(todos: &[TodoItem]) -> usize {
        todos.iter().filter(|todo| !todo.completed).count()
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let path = unique_data_path("ids");
        let store = FileStore::open(path.clone()).await.unwrap();
        let first = store.insert("one".to_string()).await.unwrap();
        let second = store.insert("two".to_string()).await.unwrap();

        assert!(!first.completed);
        assert_eq!(first.id.len(), 24);
        assert!(second.id > first.id);
        assert_eq!(remaining(&store.list().await), 2);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn text_selector_targets_newest_duplicate() {
        let path = unique_data_path("dup");
        let store = FileStore::open(path.clone()).await.unwrap();
        let older = store.insert("same".to_string()).await.unwrap();
        let newer = store.insert("same".to_string()).await.unwrap();

        let selector = ItemSelector::Text("same".to_string());
        let updated = store.set_completed(&selector, true).await.unwrap().unwrap();
        assert_eq!(updated.id, newer.id);

        let todos = store.list().await;
        assert!(!todos.iter().find(|todo| todo.id == older.id).unwrap().completed);
        assert_eq!(remaining(&todos), 1);

        let removed = store.delete(&selector).await.unwrap().unwrap();
        assert_eq!(removed.id, newer.id);
        assert_eq!(store.list().await, vec![older]);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn missing_item_changes_nothing() {
        let path = unique_data_path("missing");
        let store = FileStore::open(path.clone()).await.unwrap();
        store.insert("kept".to_string()).await.unwrap();

        let selector = ItemSelector::Text("absent".to_string());
        assert!(store.set_completed(&selector, true).await.unwrap().is_none());
        assert!(store.delete(&selector).await.unwrap().is_none());
        assert!(store
            .delete(&ItemSelector::Id("not-an-id".to_string()))
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.list().await.len(), 1);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn reopening_restores_persisted_items() {
        let path = unique_data_path("reopen");
        let store = FileStore::open(path.clone()).await.unwrap();
        let item = store.insert("persisted".to_string()).await.unwrap();
        store
            .set_completed(&ItemSelector::Id(item.id.clone()), true)
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::open(path.clone()).await.unwrap();
        let todos = reopened.list().await;
        assert_eq!(todos.len(), 1);
        assert!(todos[0].completed);

        let next = reopened.insert("after".to_string()).await.unwrap();
        assert!(next.id > item.id);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn corrupt_file_loads_as_empty() {
        let path = unique_data_path("corrupt");
        std::fs::write(&path, b"not json").unwrap();
        let store = FileStore::open(path.clone()).await.unwrap();
        assert!(store.list().await.is_empty());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_leaves_collection_unchanged() {
        let dir = unique_data_path("dir");
        std::fs::create_dir_all(&dir).unwrap();
        let store = FileStore::open(dir.clone()).await.unwrap();

        assert!(store.insert("ghost".to_string()).await.is_err());
        assert!(store.list().await.is_empty());

        store.data.lock().await.todos.push(TodoItem {
            id: format_id(1),
            text: "seeded".to_string(),
            completed: false,
        });
        let selector = ItemSelector::Text("seeded".to_string());
        assert!(store.set_completed(&selector, true).await.is_err());
        assert!(store.delete(&selector).await.is_err());

        let todos = store.list().await;
        assert_eq!(todos.len(), 1);
        assert!(!todos[0].completed);
        assert_eq!(store.data.lock().await.next_id, 0);
        let _ = std::fs::remove_dir_all(dir);
    }
}
