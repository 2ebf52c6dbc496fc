//! Domain model for the board.
//!
//! Columns, tasks, comments, and the board aggregate, together with the
//! actions the reducer accepts and the reasons it may decline them. The
//! mutation primitives on [`TaskList`] keep task status and column
//! membership consistent on their own.

mod action;
mod comment;
mod error;
mod ids;
mod profile;
mod rejection;
mod state;
mod task;
mod task_list;

pub use action::{BoardAction, ColumnRemovalPolicy};
pub use comment::Comment;
pub use error::{BoardDomainError, InvariantViolation, ParsePriorityError};
pub use ids::{ColumnName, CommentId, TaskId};
pub use profile::UserProfile;
pub use rejection::Rejection;
pub use state::BoardState;
pub(crate) use state::BoardStateParts;
pub use task::{Attachment, Priority, Task, TaskPatch};
pub use task_list::{TaskList, TaskLocation};
