//! Actions accepted by the board reducer.

use super::{ColumnName, Comment, CommentId, Task, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};

/// What happens to the tasks of a column that is being removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ColumnRemovalPolicy {
    /// Drop the column together with its tasks. The tasks are no longer
    /// reachable from any column.
    #[default]
    DiscardTasks,
    /// Only remove the column when it holds no tasks.
    RequireEmpty,
    /// Append the column's tasks to another existing column first.
    ReassignTo(ColumnName),
}

/// A mutation request for the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum BoardAction {
    /// Append an empty column with a generated name.
    AddColumn,
    /// Rename a column, cascading the new name into its tasks.
    RenameColumn {
        /// Column to rename.
        old_name: ColumnName,
        /// Requested name; trimmed before use.
        new_name: String,
    },
    /// Remove a column.
    RemoveColumn {
        /// Column to remove.
        column_name: ColumnName,
        /// Handling of the column's tasks.
        #[serde(default)]
        policy: ColumnRemovalPolicy,
    },
    /// Replace the column order.
    ReorderColumns {
        /// New rendering order.
        column_order: Vec<ColumnName>,
    },
    /// Append a task to a column.
    AddTask {
        /// Destination column.
        column: ColumnName,
        /// Task to add.
        task: Task,
    },
    /// Remove a task from a column.
    RemoveTask {
        /// Column holding the task.
        column: ColumnName,
        /// Task to remove.
        task_id: TaskId,
    },
    /// Move a task to a position within or across columns.
    MoveTaskAtIndex {
        /// Column currently holding the task.
        from: ColumnName,
        /// Destination column.
        to: ColumnName,
        /// Task to move.
        task_id: TaskId,
        /// Insertion point in the destination list. For moves within a
        /// column it counts positions with the task already removed.
        index: usize,
    },
    /// Merge a partial task into an existing task.
    EditTask {
        /// Column holding the task.
        column: ColumnName,
        /// Fields to replace; the patch identifier selects the task.
        task: TaskPatch,
    },
    /// Append a comment to a task.
    AddComment {
        /// Column holding the task.
        column: ColumnName,
        /// Task receiving the comment.
        task_id: TaskId,
        /// Comment to append.
        comment: Comment,
    },
    /// Delete a comment from a task.
    DeleteComment {
        /// Column holding the task.
        column: ColumnName,
        /// Task owning the comment.
        task_id: TaskId,
        /// Comment to delete.
        comment_id: CommentId,
    },
    /// Replace the content of a comment.
    EditComment {
        /// Column holding the task.
        column: ColumnName,
        /// Task owning the comment.
        task_id: TaskId,
        /// Comment to edit.
        comment_id: CommentId,
        /// Replacement text.
        content: String,
    },
    /// Set or clear the search term.
    SetSearchTerm {
        /// Search text; blank clears the search.
        search_term: String,
    },
    /// Restore the initialization snapshot.
    ResetTasks,
}

impl BoardAction {
    /// Removes a column with the default [`ColumnRemovalPolicy::DiscardTasks`]
    /// policy.
    #[must_use]
    pub fn remove_column(column_name: ColumnName) -> Self {
        Self::RemoveColumn {
            column_name,
            policy: ColumnRemovalPolicy::DiscardTasks,
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn search(search_term: impl Into<String>) -> Self {
        Self::SetSearchTerm {
            search_term: search_term.into(),
        }
    }

    /// Returns the wire name of the action kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddColumn => "ADD_COLUMN",
            Self::RenameColumn { .. } => "RENAME_COLUMN",
            Self::RemoveColumn { .. } => "REMOVE_COLUMN",
            Self::ReorderColumns { .. } => "REORDER_COLUMNS",
            Self::AddTask { .. } => "ADD_TASK",
            Self::RemoveTask { .. } => "REMOVE_TASK",
            Self::MoveTaskAtIndex { .. } => "MOVE_TASK_AT_INDEX",
            Self::EditTask { .. } => "EDIT_TASK",
            Self::AddComment { .. } => "ADD_COMMENT",
            Self::DeleteComment { .. } => "DELETE_COMMENT",
            Self::EditComment { .. } => "EDIT_COMMENT",
            Self::SetSearchTerm { .. } => "SET_SEARCH_TERM",
            Self::ResetTasks => "RESET_TASKS",
        }
    }
}
