//! Pure state transitions for the board.
//!
//! Every action is first checked against the current state without touching
//! it. Only an action that passes its checks is performed, so a rejected
//! transition hands back the input state exactly as it was.

use super::filter_tasks;
use crate::board::{
    config::BoardConfig,
    domain::{
        BoardAction, BoardState, BoardStateParts, ColumnName, ColumnRemovalPolicy, Comment,
        CommentId, Rejection, Task, TaskId, TaskList, TaskPatch,
    },
};
use std::collections::HashSet;

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The action changed the board.
    Applied,
    /// The action was declined; the board is unchanged.
    Rejected(Rejection),
}

impl TransitionOutcome {
    /// Returns `true` when the action was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Next board state together with the outcome that produced it.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    state: BoardState,
    outcome: TransitionOutcome,
}

impl Transition {
    const fn applied(state: BoardState) -> Self {
        Self {
            state,
            outcome: TransitionOutcome::Applied,
        }
    }

    const fn rejected(state: BoardState, reason: Rejection) -> Self {
        Self {
            state,
            outcome: TransitionOutcome::Rejected(reason),
        }
    }

    /// Returns the resulting state.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns the outcome.
    #[must_use]
    pub const fn outcome(&self) -> &TransitionOutcome {
        &self.outcome
    }

    /// Returns `true` when the action was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        self.outcome.is_applied()
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        self.outcome.rejection()
    }

    /// Consumes the transition, returning the resulting state.
    #[must_use]
    pub fn into_state(self) -> BoardState {
        self.state
    }

    /// Consumes the transition, returning state and outcome.
    #[must_use]
    pub fn into_parts(self) -> (BoardState, TransitionOutcome) {
        (self.state, self.outcome)
    }
}

/// Applies `action` to `state` under the default configuration.
pub fn reduce(state: BoardState, action: BoardAction) -> Transition {
    BoardReducer::default().apply(state, action)
}

/// Board transition engine.
#[derive(Debug, Clone, Default)]
pub struct BoardReducer {
    config: BoardConfig,
}

impl BoardReducer {
    /// Creates a reducer using the given configuration.
    #[must_use]
    pub const fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// Returns the reducer configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Applies `action` to `state`, returning the next state and whether the
    /// action took effect.
    pub fn apply(&self, state: BoardState, action: BoardAction) -> Transition {
        match action {
            BoardAction::AddColumn => {
                let checked = self.new_column_name(&state);
                guarded(state, checked, add_column)
            }
            BoardAction::RenameColumn { old_name, new_name } => {
                let checked = check_rename(&state, &old_name, &new_name);
                guarded(state, checked, |board, renamed| {
                    rename_column(board, &old_name, renamed)
                })
            }
            BoardAction::RemoveColumn {
                column_name,
                policy,
            } => {
                let checked = check_removal(&state, &column_name, &policy);
                guarded(state, checked, |board, ()| {
                    remove_column(board, &column_name, &policy)
                })
            }
            BoardAction::ReorderColumns { column_order } => {
                let checked = check_order(&state, &column_order);
                guarded(state, checked, |board, ()| {
                    reorder_columns(board, column_order)
                })
            }
            BoardAction::AddTask { column, task } => {
                let checked = check_new_task(&state, &column, &task);
                guarded(state, checked, |board, ()| add_task(board, &column, task))
            }
            BoardAction::RemoveTask { column, task_id } => {
                let checked = task_index(&state, &column, &task_id);
                guarded(state, checked, |board, _| {
                    remove_task(board, &column, &task_id)
                })
            }
            BoardAction::MoveTaskAtIndex {
                from,
                to,
                task_id,
                index,
            } => {
                let checked = check_move(&state, &from, &to, &task_id, index);
                guarded(state, checked, |board, ()| {
                    move_task(board, &from, &to, &task_id, index)
                })
            }
            BoardAction::EditTask { column, task } => {
                let checked = check_edit(&state, &column, &task);
                guarded(state, checked, |board, ()| edit_task(board, &column, task))
            }
            BoardAction::AddComment {
                column,
                task_id,
                comment,
            } => {
                let checked = check_new_comment(&state, &column, &task_id, &comment);
                guarded(state, checked, |board, ()| {
                    update_task(board, &column, &task_id, |task| task.push_comment(comment))
                })
            }
            BoardAction::DeleteComment {
                column,
                task_id,
                comment_id,
            } => {
                let checked = check_comment(&state, &column, &task_id, &comment_id);
                guarded(state, checked, |board, ()| {
                    update_task(board, &column, &task_id, |task| {
                        task.remove_comment(&comment_id);
                    })
                })
            }
            BoardAction::EditComment {
                column,
                task_id,
                comment_id,
                content,
            } => {
                let checked = check_comment(&state, &column, &task_id, &comment_id);
                guarded(state, checked, |board, ()| {
                    update_task(board, &column, &task_id, |task| {
                        task.edit_comment(&comment_id, content);
                    })
                })
            }
            BoardAction::SetSearchTerm { search_term } => {
                Transition::applied(set_search_term(state, search_term))
            }
            BoardAction::ResetTasks => Transition::applied(state.reset()),
        }
    }

    fn new_column_name(&self, state: &BoardState) -> Result<ColumnName, Rejection> {
        let position = state.column_order().len().saturating_add(1);
        let name = ColumnName::new(self.config.generated_column_name(position))
            .map_err(|_| Rejection::EmptyColumnName)?;
        if state.has_column(&name) {
            return Err(Rejection::GeneratedColumnExists(name));
        }
        Ok(name)
    }
}

/// Runs `perform` with the value a successful check produced. A failed check
/// hands `state` back untouched.
fn guarded<T>(
    state: BoardState,
    checked: Result<T, Rejection>,
    perform: impl FnOnce(BoardState, T) -> BoardState,
) -> Transition {
    match checked {
        Ok(value) => Transition::applied(perform(state, value)),
        Err(reason) => Transition::rejected(state, reason),
    }
}

fn add_column(state: BoardState, name: ColumnName) -> BoardState {
    let mut parts = state.into_parts();
    parts.current_tasks.push_column(name.clone());
    parts.column_order.push(name);
    refresh(parts)
}

fn rename_column(state: BoardState, old: &ColumnName, renamed: ColumnName) -> BoardState {
    let mut parts = state.into_parts();
    parts.current_tasks.rename_column(old, &renamed);
    if let Some(slot) = parts.column_order.iter_mut().find(|column| **column == *old) {
        *slot = renamed;
    }
    refresh(parts)
}

fn remove_column(
    state: BoardState,
    column: &ColumnName,
    policy: &ColumnRemovalPolicy,
) -> BoardState {
    let mut parts = state.into_parts();
    let removed = parts.current_tasks.remove_column(column).unwrap_or_default();
    parts.column_order.retain(|name| name != column);
    if let ColumnRemovalPolicy::ReassignTo(target) = policy {
        for task in removed {
            parts.current_tasks.insert_task(target, usize::MAX, task);
        }
    }
    refresh(parts)
}

fn reorder_columns(state: BoardState, column_order: Vec<ColumnName>) -> BoardState {
    let mut parts = state.into_parts();
    parts.column_order = column_order;
    BoardState::from_parts(parts)
}

/// Appends the task and resets the filtered view to the full task list.
fn add_task(state: BoardState, column: &ColumnName, task: Task) -> BoardState {
    let mut parts = state.into_parts();
    parts.current_tasks.insert_task(column, usize::MAX, task);
    parts.filtered_tasks = parts.current_tasks.clone();
    BoardState::from_parts(parts)
}

fn remove_task(state: BoardState, column: &ColumnName, task_id: &TaskId) -> BoardState {
    let mut parts = state.into_parts();
    parts.current_tasks.take_task(column, task_id);
    refresh(parts)
}

fn move_task(
    state: BoardState,
    from: &ColumnName,
    to: &ColumnName,
    task_id: &TaskId,
    index: usize,
) -> BoardState {
    let mut parts = state.into_parts();
    if let Some((_, task)) = parts.current_tasks.take_task(from, task_id) {
        parts.current_tasks.insert_task(to, index, task);
    }
    refresh(parts)
}

fn edit_task(state: BoardState, column: &ColumnName, patch: TaskPatch) -> BoardState {
    let task_id = patch.id().clone();
    update_task(state, column, &task_id, |task| task.apply_patch(patch))
}

fn update_task(
    state: BoardState,
    column: &ColumnName,
    task_id: &TaskId,
    update: impl FnOnce(&mut Task),
) -> BoardState {
    let mut parts = state.into_parts();
    if let Some(task) = parts.current_tasks.task_mut(column, task_id) {
        update(task);
    }
    refresh(parts)
}

fn set_search_term(state: BoardState, search_term: String) -> BoardState {
    let mut parts = state.into_parts();
    if search_term.trim().is_empty() {
        parts.search_term = String::new();
    } else {
        parts.search_term = search_term;
    }
    refresh(parts)
}

/// Recomputes the filtered view from the current tasks.
fn refresh(mut parts: BoardStateParts) -> BoardState {
    parts.filtered_tasks = project(&parts.current_tasks, &parts.search_term);
    BoardState::from_parts(parts)
}

fn project(tasks: &TaskList, term: &str) -> TaskList {
    filter_tasks(tasks, term).into_owned()
}

fn require_column(state: &BoardState, column: &ColumnName) -> Result<(), Rejection> {
    if state.has_column(column) {
        Ok(())
    } else {
        Err(Rejection::UnknownColumn(column.clone()))
    }
}

fn task_index(state: &BoardState, column: &ColumnName, task_id: &TaskId) -> Result<usize, Rejection> {
    let tasks = state
        .current_tasks()
        .tasks(column)
        .ok_or_else(|| Rejection::UnknownColumn(column.clone()))?;
    tasks
        .iter()
        .position(|task| task.id() == task_id)
        .ok_or_else(|| Rejection::UnknownTask {
            column: column.clone(),
            task_id: task_id.clone(),
        })
}

fn check_rename(
    state: &BoardState,
    old: &ColumnName,
    requested: &str,
) -> Result<ColumnName, Rejection> {
    let renamed = ColumnName::new(requested).map_err(|_| Rejection::EmptyColumnName)?;
    if renamed != *old && state.has_column(&renamed) {
        return Err(Rejection::ColumnNameTaken(renamed));
    }
    require_column(state, old)?;
    if renamed == *old {
        return Err(Rejection::UnchangedColumnName(renamed));
    }
    Ok(renamed)
}

fn check_new_task(
    state: &BoardState,
    column: &ColumnName,
    task: &Task,
) -> Result<(), Rejection> {
    require_column(state, column)?;
    if state.current_tasks().contains_task(task.id()) {
        return Err(Rejection::DuplicateTaskId(task.id().clone()));
    }
    Ok(())
}

fn check_edit(
    state: &BoardState,
    column: &ColumnName,
    patch: &TaskPatch,
) -> Result<(), Rejection> {
    task_index(state, column, patch.id())?;
    if patch.title().is_some_and(|title| title.trim().is_empty()) {
        return Err(Rejection::EmptyTaskTitle(patch.id().clone()));
    }
    Ok(())
}

fn check_removal(
    state: &BoardState,
    column: &ColumnName,
    policy: &ColumnRemovalPolicy,
) -> Result<(), Rejection> {
    let tasks = state
        .current_tasks()
        .tasks(column)
        .ok_or_else(|| Rejection::UnknownColumn(column.clone()))?;
    match policy {
        ColumnRemovalPolicy::DiscardTasks => Ok(()),
        ColumnRemovalPolicy::RequireEmpty if tasks.is_empty() => Ok(()),
        ColumnRemovalPolicy::RequireEmpty => Err(Rejection::ColumnNotEmpty {
            column: column.clone(),
            task_count: tasks.len(),
        }),
        ColumnRemovalPolicy::ReassignTo(target) if target != column && state.has_column(target) => {
            Ok(())
        }
        ColumnRemovalPolicy::ReassignTo(target) => Err(Rejection::InvalidReassignment {
            column: column.clone(),
            target: target.clone(),
        }),
    }
}

fn check_order(state: &BoardState, order: &[ColumnName]) -> Result<(), Rejection> {
    let unique: HashSet<&ColumnName> = order.iter().collect();
    let is_permutation = unique.len() == order.len()
        && order.len() == state.current_tasks().len()
        && order.iter().all(|column| state.has_column(column));
    if is_permutation {
        Ok(())
    } else {
        Err(Rejection::InvalidColumnOrder)
    }
}

fn check_move(
    state: &BoardState,
    from: &ColumnName,
    to: &ColumnName,
    task_id: &TaskId,
    index: usize,
) -> Result<(), Rejection> {
    require_column(state, from)?;
    require_column(state, to)?;
    let current = task_index(state, from, task_id)?;
    if from == to {
        let remaining = state
            .current_tasks()
            .tasks(from)
            .map_or(0, |tasks| tasks.len().saturating_sub(1));
        if index.min(remaining) == current {
            return Err(Rejection::RedundantMove {
                task_id: task_id.clone(),
                index: current,
            });
        }
    }
    Ok(())
}

fn check_new_comment(
    state: &BoardState,
    column: &ColumnName,
    task_id: &TaskId,
    comment: &Comment,
) -> Result<(), Rejection> {
    task_index(state, column, task_id)?;
    let duplicate = state
        .find_task(task_id)
        .is_some_and(|(_, task)| task.comment(comment.id()).is_some());
    if duplicate {
        return Err(Rejection::DuplicateCommentId {
            task_id: task_id.clone(),
            comment_id: comment.id().clone(),
        });
    }
    Ok(())
}

fn check_comment(
    state: &BoardState,
    column: &ColumnName,
    task_id: &TaskId,
    comment_id: &CommentId,
) -> Result<(), Rejection> {
    task_index(state, column, task_id)?;
    let present = state
        .find_task(task_id)
        .is_some_and(|(_, task)| task.comment(comment_id).is_some());
    if present {
        Ok(())
    } else {
        Err(Rejection::UnknownComment {
            task_id: task_id.clone(),
            comment_id: comment_id.clone(),
        })
    }
}
