//! Board state aggregate.

use super::{ColumnName, InvariantViolation, Task, TaskId, TaskList, TaskLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Top-level board aggregate.
///
/// `current_tasks` is the single source of truth. `filtered_tasks` is a
/// projection of it under `search_term`, and `column_order` is always a
/// permutation of the current column names. `original_tasks` is the
/// initialization snapshot used by reset and is never mutated.
///
/// Deserializing a state runs [`BoardState::check_invariants`]; a document
/// that breaks an invariant fails to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BoardStateParts")]
pub struct BoardState {
    original_tasks: TaskList,
    current_tasks: TaskList,
    filtered_tasks: TaskList,
    search_term: String,
    column_order: Vec<ColumnName>,
}

/// Parameter object for assembling a board state from its parts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BoardStateParts {
    /// Initialization snapshot.
    pub(crate) original_tasks: TaskList,
    /// Current tasks.
    pub(crate) current_tasks: TaskList,
    /// Filtered projection of the current tasks.
    pub(crate) filtered_tasks: TaskList,
    /// Active search term.
    pub(crate) search_term: String,
    /// Rendering order of the columns.
    pub(crate) column_order: Vec<ColumnName>,
}

impl TryFrom<BoardStateParts> for BoardState {
    type Error = InvariantViolation;

    fn try_from(parts: BoardStateParts) -> Result<Self, Self::Error> {
        let state = Self::from_parts(parts);
        state.check_invariants()?;
        Ok(state)
    }
}

impl BoardState {
    /// Creates the initial state for a board: no search is active and the
    /// column order follows the task list's column order.
    #[must_use]
    pub fn initial(tasks: TaskList) -> Self {
        let column_order = tasks.column_names().cloned().collect();
        Self {
            original_tasks: tasks.clone(),
            current_tasks: tasks.clone(),
            filtered_tasks: tasks,
            search_term: String::new(),
            column_order,
        }
    }

    /// Returns a fresh state equal to this board's initialization snapshot.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::initial(self.original_tasks.clone())
    }

    pub(crate) fn from_parts(parts: BoardStateParts) -> Self {
        Self {
            original_tasks: parts.original_tasks,
            current_tasks: parts.current_tasks,
            filtered_tasks: parts.filtered_tasks,
            search_term: parts.search_term,
            column_order: parts.column_order,
        }
    }

    pub(crate) fn into_parts(self) -> BoardStateParts {
        BoardStateParts {
            original_tasks: self.original_tasks,
            current_tasks: self.current_tasks,
            filtered_tasks: self.filtered_tasks,
            search_term: self.search_term,
            column_order: self.column_order,
        }
    }

    /// Returns the initialization snapshot.
    #[must_use]
    pub const fn original_tasks(&self) -> &TaskList {
        &self.original_tasks
    }

    /// Returns the current tasks.
    #[must_use]
    pub const fn current_tasks(&self) -> &TaskList {
        &self.current_tasks
    }

    /// Returns the search projection of the current tasks.
    #[must_use]
    pub const fn filtered_tasks(&self) -> &TaskList {
        &self.filtered_tasks
    }

    /// Returns the active search term; empty when no search is active.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns the rendering order of the columns.
    #[must_use]
    pub fn column_order(&self) -> &[ColumnName] {
        &self.column_order
    }

    /// Returns `true` when the column exists.
    #[must_use]
    pub fn has_column(&self, name: &ColumnName) -> bool {
        self.current_tasks.contains_column(name)
    }

    /// Returns the index of a column in the rendering order.
    #[must_use]
    pub fn column_position(&self, name: &ColumnName) -> Option<usize> {
        self.column_order.iter().position(|column| column == name)
    }

    /// Finds a task and its location among the current tasks.
    #[must_use]
    pub fn find_task(&self, id: &TaskId) -> Option<(TaskLocation, &Task)> {
        self.current_tasks.find(id)
    }

    /// Verifies the board invariants, returning the first violation found.
    ///
    /// # Errors
    ///
    /// Returns the [`InvariantViolation`] describing the broken invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.check_column_order()?;
        self.check_tasks()?;
        self.check_filter()
    }

    fn check_column_order(&self) -> Result<(), InvariantViolation> {
        let ordered: HashSet<&ColumnName> = self.column_order.iter().collect();
        let keys: HashSet<&ColumnName> = self.current_tasks.column_names().collect();
        if ordered.len() != self.column_order.len()
            || self.column_order.len() != self.current_tasks.len()
            || ordered != keys
        {
            return Err(InvariantViolation::ColumnOrderMismatch);
        }
        Ok(())
    }

    fn check_tasks(&self) -> Result<(), InvariantViolation> {
        let mut task_ids = HashSet::new();
        for (column, tasks) in self.current_tasks.columns() {
            for task in tasks {
                if task.status() != column {
                    return Err(InvariantViolation::StatusMismatch {
                        task_id: task.id().clone(),
                        column: column.clone(),
                        status: task.status().clone(),
                    });
                }
                if !task_ids.insert(task.id()) {
                    return Err(InvariantViolation::DuplicateTask(task.id().clone()));
                }
                let mut comment_ids = HashSet::new();
                for comment in task.comments() {
                    if !comment_ids.insert(comment.id()) {
                        return Err(InvariantViolation::DuplicateComment {
                            task_id: task.id().clone(),
                            comment_id: comment.id().clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_filter(&self) -> Result<(), InvariantViolation> {
        if self.search_term.trim().is_empty() {
            if self.filtered_tasks != self.current_tasks {
                return Err(InvariantViolation::StaleFilter);
            }
            return Ok(());
        }
        if self.filtered_tasks.len() != self.current_tasks.len() {
            return Err(InvariantViolation::FilterDiverged);
        }
        for (column, filtered) in self.filtered_tasks.columns() {
            let current = self
                .current_tasks
                .tasks(column)
                .ok_or(InvariantViolation::FilterDiverged)?;
            let mut remaining = current.iter().map(Task::id);
            let in_order = filtered
                .iter()
                .all(|task| remaining.any(|id| id == task.id()));
            if !in_order {
                return Err(InvariantViolation::FilterDiverged);
            }
        }
        Ok(())
    }
}
