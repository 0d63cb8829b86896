use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "thing")]
    pub text: String,
    pub completed: bool,
}

/// Which stored item a mutation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    Id(String),
    /// Exact text match; ties go to the most recently created item.
    Text(String),
}

impl ItemSelector {
    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            ItemSelector::Id(id) => item.id == *id,
            ItemSelector::Text(text) => item.text == *text,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewTodoForm {
    #[serde(rename = "todoItem")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(rename = "itemFromJS")]
    pub item_from_js: Option<String>,
    pub id: Option<String>,
}

impl ItemRequest {
    pub fn selector(self) -> Option<ItemSelector> {
        match (self.id, self.item_from_js) {
            (Some(id), _) if !id.is_empty() => Some(ItemSelector::Id(id)),
            (_, Some(text)) => Some(ItemSelector::Text(text)),
            _ => None,
        }
    }
}
