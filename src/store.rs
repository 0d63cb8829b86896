use crate::config::{Config, StoreKind};
use crate::models::{ItemSelector, TodoItem};
use crate::mongo::MongoStore;
use crate::storage::FileStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("DB_STRING must be set to use the mongo store")]
    MissingConnectionString,
}

#[derive(Debug, Clone)]
pub struct TodoSnapshot {
    pub items: Vec<TodoItem>,
    pub left: u64,
}

/// The todo collection, backed by MongoDB or a local JSON file.
#[derive(Clone)]
pub enum Store {
    Mongo(MongoStore),
    File(FileStore),
}

impl Store {
    pub async fn open(config: &Config) -> Result<Self, StoreError> {
        match config.store {
            StoreKind::Mongo => {
                let uri = config
                    .db_string
                    .as_deref()
                    .ok_or(StoreError::MissingConnectionString)?;
                Ok(Store::Mongo(MongoStore::connect(uri, &config.db_name).await?))
            }
            StoreKind::File => Ok(Store::File(FileStore::open(config.data_path.clone()).await?)),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Store::Mongo(_) => "mongo",
            Store::File(_) => "file",
        }
    }

    /// All items in insertion order.
    pub async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        match self {
            Store::Mongo(store) => store.list().await,
            Store::File(store) => Ok(store.list().await),
        }
    }

    /// Items plus the number still open, both taken from one read so they agree.
    pub async fn snapshot(&self) -> Result<TodoSnapshot, StoreError> {
        let items = self.list().await?;
        let left = items.iter().filter(|item| !item.completed).count() as u64;
        Ok(TodoSnapshot { items, left })
    }

    pub async fn insert(&self, text: String) -> Result<TodoItem, StoreError> {
        match self {
            Store::Mongo(store) => store.insert(text).await,
            Store::File(store) => store.insert(text).await,
        }
    }

    /// Returns the updated item, or `None` when nothing matched.
    pub async fn set_completed(
        &self,
        selector: &ItemSelector,
        completed: bool,
    ) -> Result<Option<TodoItem>, StoreError> {
        match self {
            Store::Mongo(store) => store.set_completed(selector, completed).await,
            Store::File(store) => store.set_completed(selector, completed).await,
        }
    }

    /// Returns the removed item, or `None` when nothing matched.
    pub async fn delete(&self, selector: &ItemSelector) -> Result<Option<TodoItem>, StoreError> {
        match self {
            Store::Mongo(store) => store.delete(selector).await,
            Store::File(store) => store.delete(selector).await,
        }
    }
}
