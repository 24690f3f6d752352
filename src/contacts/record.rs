use serde::{Deserialize, Serialize};

pub const DEFAULT_RELATIONSHIP_LEVEL: i32 = 3;

fn default_relationship_level() -> i32 {
    DEFAULT_RELATIONSHIP_LEVEL
}

/// A contact document as stored by the backend, keyed by user.
///
/// Only `id`, `name`, `photo_url`, `tags`, `relationship_level` and
/// `connected_to` feed the tree; the rest is carried for the detail view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub photo_url: String,
    pub tags: Vec<String>,
    #[serde(default = "default_relationship_level")]
    pub relationship_level: i32,
    pub notes: String,
    pub connected_to: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ContactRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, relationship_level: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            relationship_level,
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_connections<I, S>(mut self, connected_to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.connected_to = connected_to.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_photo(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = photo_url.into();
        self
    }
}
