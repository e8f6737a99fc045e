use crate::*;
use serde::Deserializer;
use sqlx::FromRow;

/// The persisted entity: one row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTodo {
    pub fn validate(&self) -> Result {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".to_owned()));
        }
        OK
    }
}

/// Partial update: only fields present in the request are applied.
///
/// `description` distinguishes three wire states: absent (leave unchanged),
/// `null` (clear) and a string (set), hence the double `Option`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn validate(&self) -> Result {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(Error::Validation("title must not be empty".to_owned()));
            }
        }
        OK
    }
}

/// Outcome of a delete: a miss is reported, not raised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
}

fn double_option<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}
