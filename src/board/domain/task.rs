//! Task records and partial task updates.

use super::{BoardDomainError, ColumnName, Comment, CommentId, ParsePriorityError, TaskId, UserProfile};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Regular work.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Attachment descriptor. The content itself is referenced, never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// File name shown to the user.
    pub name: String,
    /// Content reference (URL or encoded payload).
    pub url: String,
    /// Media type, e.g. `image/png`.
    #[serde(rename = "type")]
    pub media_type: String,
}

impl Attachment {
    /// Creates an attachment descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            media_type: media_type.into(),
        }
    }
}

/// A work item held by exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: ColumnName,
    priority: Priority,
    due_date: NaiveDate,
    tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assignee: Option<UserProfile>,
    comments: Vec<Comment>,
    files: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl Task {
    /// Creates a task with the required fields. Optional fields start empty
    /// and priority starts at [`Priority::Medium`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        status: ColumnName,
        due_date: NaiveDate,
    ) -> Result<Self, BoardDomainError> {
        let owned_title = title.into();
        if owned_title.trim().is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            id,
            title: owned_title,
            description: String::new(),
            status,
            priority: Priority::default(),
            due_date,
            tags: BTreeSet::new(),
            assignee: None,
            comments: Vec::new(),
            files: Vec::new(),
            image: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the tags. Duplicates collapse.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserProfile) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Appends a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Appends an attachment.
    #[must_use]
    pub fn with_file(mut self, file: Attachment) -> Self {
        self.files.push(file);
        self
    }

    /// Sets the display image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the name of the column holding this task.
    #[must_use]
    pub const fn status(&self) -> &ColumnName {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the tag set.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&UserProfile> {
        self.assignee.as_ref()
    }

    /// Returns the comments in insertion order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the attachments in insertion order.
    #[must_use]
    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    /// Returns the display image URL, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the comment with the given identifier.
    #[must_use]
    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id() == id)
    }

    /// Returns `true` when the title or description contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    pub(crate) fn set_status(&mut self, status: ColumnName) {
        self.status = status;
    }

    pub(crate) fn apply_patch(&mut self, patch: TaskPatch) {
        let TaskPatch {
            id: _,
            title,
            description,
            priority,
            due_date,
            tags,
            assignee,
            files,
            image,
        } = patch;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = tags {
            self.tags = value;
        }
        if let Some(value) = assignee {
            self.assignee = value;
        }
        if let Some(value) = files {
            self.files = value;
        }
        if let Some(value) = image {
            self.image = value;
        }
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Removes a comment, returning `false` when it was absent.
    pub(crate) fn remove_comment(&mut self, id: &CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|comment| comment.id() != id);
        self.comments.len() != before
    }

    /// Replaces a comment's content, returning `false` when it was absent.
    pub(crate) fn edit_comment(&mut self, id: &CommentId, content: String) -> bool {
        match self.comments.iter_mut().find(|comment| comment.id() == id) {
            Some(comment) => {
                comment.replace_content(content);
                true
            }
            None => false,
        }
    }
}

/// Partial task used by edit actions. Unset fields are left untouched.
///
/// The identifier selects the task to edit; status and comments are changed
/// only through move and comment actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tags: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assignee: Option<Option<UserProfile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    files: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<Option<String>>,
}

impl TaskPatch {
    /// Creates an empty patch targeting the given task.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            priority: None,
            due_date: None,
            tags: None,
            assignee: None,
            files: None,
            image: None,
        }
    }

    /// Returns the identifier of the targeted task.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the replacement title, if the patch carries one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Assigns the task to a user.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserProfile) -> Self {
        self.assignee = Some(Some(assignee));
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub fn without_assignee(mut self) -> Self {
        self.assignee = Some(None);
        self
    }

    /// Replaces the attachments.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = Attachment>) -> Self {
        self.files = Some(files.into_iter().collect());
        self
    }

    /// Replaces the display image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(Some(image.into()));
        self
    }

    /// Clears the display image.
    #[must_use]
    pub fn without_image(mut self) -> Self {
        self.image = Some(None);
        self
    }
}
