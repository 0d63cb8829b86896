use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 2121;
pub const DEFAULT_DB_NAME: &str = "todo";
pub const DEFAULT_DATA_PATH: &str = "data/todos.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    File,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store: StoreKind,
    pub db_string: Option<String>,
    pub db_name: String,
    pub data_path: PathBuf,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_string = lookup("DB_STRING").filter(|value| !value.trim().is_empty());

        let store = match lookup("TODO_STORE").as_deref().map(str::trim) {
            Some("file") => StoreKind::File,
            Some("mongo") => StoreKind::Mongo,
            _ if db_string.is_some() => StoreKind::Mongo,
            _ => StoreKind::File,
        };

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            store,
            db_string,
            db_name: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
        }
    }
}
