use super::types::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single note as cached by the store.
///
/// `id` and both timestamps are always assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memo {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: Category,

    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Memo {
    /// The mutable fields of this memo, as a form pre-filled for editing.
    pub fn to_form(&self) -> MemoFormData {
        MemoFormData {
            title: self.title.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Row shape returned by the remote store.
///
/// Nullable columns come back as JSON `null`; `content` and `category` read
/// a null as their default so one sparse row cannot fail a whole select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoRow {
    pub id: String,
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<MemoRow> for Memo {
    fn from(row: MemoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category: row.category,
            tags: row.tags.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Caller-supplied fields for create and update.
///
/// Serializes to exactly the four mutable columns, so it doubles as the
/// insert/update payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemoFormData {
    pub title: String,
    pub content: String,
    pub category: Category,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl MemoFormData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}
