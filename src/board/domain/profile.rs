//! Display-only user references.

use serde::{Deserialize, Serialize};

/// A user shown as a task assignee or comment author.
///
/// Profiles carry no ownership semantics; they exist purely for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
}

impl UserProfile {
    /// Creates a profile from a name and avatar URL.
    #[must_use]
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}
