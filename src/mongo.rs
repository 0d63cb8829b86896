use crate::models::{ItemSelector, TodoItem};
use crate::store::StoreError;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{FindOneAndDeleteOptions, FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const COLLECTION_NAME: &str = "todos";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    thing: String,
    completed: bool,
}

impl TodoDocument {
    /// Documents written outside this service may lack `_id`; they render with an
    /// empty `data-id` and can only be targeted by text.
    fn into_item(self) -> TodoItem {
        if self.id.is_none() {
            debug!(thing = %self.thing, "todo document has no _id");
        }
        TodoItem {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            text: self.thing,
            completed: self.completed,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MongoStore {
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("connected to {db_name} database");

        Ok(Self {
            collection: db.collection(COLLECTION_NAME),
        })
    }

    pub async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        let mut cursor = self.collection.find(None, None).await?;
        let mut todos = Vec::new();
        while cursor.advance().await? {
            todos.push(cursor.deserialize_current()?.into_item());
        }
        Ok(todos)
    }

    pub async fn insert(&self, text: String) -> Result<TodoItem, StoreError> {
        let mut document = TodoDocument {
            id: None,
            thing: text,
            completed: false,
        };
        let result = self.collection.insert_one(&document, None).await?;
        document.id = result.inserted_id.as_object_id();
        Ok(document.into_item())
    }

    pub async fn set_completed(
        &self,
        selector: &ItemSelector,
        completed: bool,
    ) -> Result<Option<TodoItem>, StoreError> {
        let Some(filter) = selector_filter(selector) else {
            return Ok(None);
        };
        let options = FindOneAndUpdateOptions::builder()
            .sort(newest_first())
            .upsert(false)
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$set": { "completed": completed } }, options)
            .await?;
        Ok(updated.map(TodoDocument::into_item))
    }

    pub async fn delete(&self, selector: &ItemSelector) -> Result<Option<TodoItem>, StoreError> {
        let Some(filter) = selector_filter(selector) else {
            return Ok(None);
        };
        let options = FindOneAndDeleteOptions::builder().sort(newest_first()).build();
        let removed = self.collection.find_one_and_delete(filter, options).await?;
        Ok(removed.map(TodoDocument::into_item))
    }
}

fn newest_first() -> Document {
    doc! { "_id": -1 }
}

/// `None` when the selector cannot match any document (e.g. a malformed id).
fn selector_filter(selector: &ItemSelector) -> Option<Document> {
    match selector {
        ItemSelector::Id(id) => ObjectId::parse_str(id).ok().map(|oid| doc! { "_id": oid }),
        ItemSelector::Text(text) => Some(doc! { "thing": text.as_str() }),
    }
}
