//! Task comments.

use super::{CommentId, UserProfile};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment attached to a task.
///
/// Only the content of a comment changes after creation; the identifier,
/// author, and creation timestamp are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    id: CommentId,
    author: UserProfile,
    content: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment with a generated identifier, stamped with the
    /// current clock time.
    #[must_use]
    pub fn new(author: UserProfile, content: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: CommentId::generate(),
            author,
            content: content.into(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a comment from known parts.
    #[must_use]
    pub fn from_parts(
        id: CommentId,
        author: UserProfile,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            content: content.into(),
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the comment author.
    #[must_use]
    pub const fn author(&self) -> &UserProfile {
        &self.author
    }

    /// Returns the comment text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn replace_content(&mut self, content: String) {
        self.content = content;
    }
}
