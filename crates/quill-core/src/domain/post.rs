use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::Id;

/// Maximum post length, counted in characters.
pub const MAX_TEXT_LEN: usize = 500;

/// Post entity - one authored unit of text.
///
/// Creation time is not stored separately; it is embedded in `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub author_id: Id,
    pub text: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new, not yet persisted post.
    ///
    /// The id is left nil; the service assigns one on create.
    pub fn new(author_id: Id, text: String) -> Self {
        Self {
            id: Id::nil(),
            author_id,
            text,
            updated_at: None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.timestamp()
    }

    /// Check the text length limit.
    pub fn validate(&self) -> Result<(), DomainError> {
        let len = self.text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(DomainError::InvalidArgument(format!(
                "Text is too long: {} characters, at most {} allowed",
                len, MAX_TEXT_LEN
            )));
        }

        Ok(())
    }
}
