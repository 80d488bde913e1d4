use serde::{Deserialize, Serialize};

/// Document store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    pub database: String,
    pub items_collection: String,
    pub clock_in_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_owned(),
            database: "vodex_db".to_owned(),
            items_collection: "items".to_owned(),
            clock_in_collection: "clock_in".to_owned(),
        }
    }
}
