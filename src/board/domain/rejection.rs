//! Reasons a board transition leaves the state untouched.

use super::{ColumnName, CommentId, TaskId};
use thiserror::Error;

/// Why the reducer declined an action.
///
/// A rejected action never changes the board; the reason exists so callers
/// can observe the decision.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    /// The action references a column that does not exist.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnName),

    /// The action references a task that is not in the given column.
    #[error("task {task_id} not found in column {column}")]
    UnknownTask {
        /// Column that was searched.
        column: ColumnName,
        /// Missing task.
        task_id: TaskId,
    },

    /// The action references a comment the task does not carry.
    #[error("comment {comment_id} not found on task {task_id}")]
    UnknownComment {
        /// Task that was searched.
        task_id: TaskId,
        /// Missing comment.
        comment_id: CommentId,
    },

    /// A rename targets the name of a different existing column.
    #[error("column name already in use: {0}")]
    ColumnNameTaken(ColumnName),

    /// The generated name for a new column already exists.
    #[error("generated column name already exists: {0}")]
    GeneratedColumnExists(ColumnName),

    /// A rename target is blank after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// An edit would leave the task with a blank title.
    #[error("task {0} must keep a non-empty title")]
    EmptyTaskTitle(TaskId),

    /// A rename target equals the current name.
    #[error("column {0} already has that name")]
    UnchangedColumnName(ColumnName),

    /// A move whose destination equals the task's current position.
    #[error("task {task_id} is already at index {index}")]
    RedundantMove {
        /// Task that would have moved.
        task_id: TaskId,
        /// Its current index.
        index: usize,
    },

    /// The task identifier is already used on the board.
    #[error("duplicate task identifier: {0}")]
    DuplicateTaskId(TaskId),

    /// The comment identifier is already used on the task.
    #[error("duplicate comment {comment_id} on task {task_id}")]
    DuplicateCommentId {
        /// Task owning the comments.
        task_id: TaskId,
        /// Duplicated comment.
        comment_id: CommentId,
    },

    /// A column order that is not a permutation of the current columns.
    #[error("column order must list every column exactly once")]
    InvalidColumnOrder,

    /// Removal under [`ColumnRemovalPolicy::RequireEmpty`] of a column that
    /// still holds tasks.
    ///
    /// [`ColumnRemovalPolicy::RequireEmpty`]: super::ColumnRemovalPolicy::RequireEmpty
    #[error("column {column} still holds {task_count} task(s)")]
    ColumnNotEmpty {
        /// Column that was to be removed.
        column: ColumnName,
        /// Number of tasks it holds.
        task_count: usize,
    },

    /// Reassignment target is missing or is the column being removed.
    #[error("cannot reassign tasks of {column} to {target}")]
    InvalidReassignment {
        /// Column that was to be removed.
        column: ColumnName,
        /// Requested destination.
        target: ColumnName,
    },
}
