//! Error types for board domain validation and parsing.

use super::{ColumnName, CommentId, TaskId};
use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyColumnName,

    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The comment identifier is empty after trimming.
    #[error("comment identifier must not be empty")]
    EmptyCommentId,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The same task identifier appears more than once on a board.
    #[error("duplicate task identifier: {0}")]
    DuplicateTaskId(TaskId),
}

/// Error returned while parsing task priorities from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// A broken board invariant, reported by [`BoardState::check_invariants`].
///
/// [`BoardState::check_invariants`]: super::BoardState::check_invariants
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The column order is not a permutation of the column names.
    #[error("column order does not match the current columns")]
    ColumnOrderMismatch,

    /// A task's status differs from the column holding it.
    #[error("task {task_id} in column {column} has status {status}")]
    StatusMismatch {
        /// Offending task.
        task_id: TaskId,
        /// Column holding it.
        column: ColumnName,
        /// Status it carries.
        status: ColumnName,
    },

    /// A task identifier appears more than once.
    #[error("task {0} appears more than once")]
    DuplicateTask(TaskId),

    /// A comment identifier appears more than once on a task.
    #[error("comment {comment_id} appears more than once on task {task_id}")]
    DuplicateComment {
        /// Task owning the comments.
        task_id: TaskId,
        /// Duplicated comment.
        comment_id: CommentId,
    },

    /// The filtered view is not an order-preserving subset of the current
    /// tasks for the same columns.
    #[error("filtered view diverges from the current tasks")]
    FilterDiverged,

    /// No search is active but the filtered view differs from the current
    /// tasks.
    #[error("filtered view differs from the current tasks without a search")]
    StaleFilter,
}
