//! Translation of finished drag gestures into board actions.
//!
//! The gesture collaborator reports what was lifted and what it was dropped
//! on as typed intentions. How raw element identifiers map onto those
//! intentions is up to the collaborator; [`DragSource::classify`] covers the
//! common case of a single identifier namespace shared by columns and tasks.

use crate::board::domain::{BoardAction, BoardState, ColumnName, TaskId};

/// The element lifted at the start of a drag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragSource {
    /// A whole column is being reordered.
    Column(ColumnName),
    /// A task card is being moved.
    Task(TaskId),
}

impl DragSource {
    /// Classifies a raw identifier: one equal to a column in the rendering
    /// order is a column, anything else is taken as a task identifier.
    ///
    /// Returns `None` for a blank identifier.
    #[must_use]
    pub fn classify(id: &str, state: &BoardState) -> Option<Self> {
        let column = state
            .column_order()
            .iter()
            .find(|column| column.as_str() == id);
        match column {
            Some(name) => Some(Self::Column(name.clone())),
            None => TaskId::new(id).ok().map(Self::Task),
        }
    }
}

/// Where the lifted element was released.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// The column's drop zone: append to the end of the column, or for a
    /// column drag, take that column's position.
    Column(ColumnName),
    /// A task card: insert at that task's position.
    Task(TaskId),
}

/// A resolved drag outcome, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragInstruction {
    /// Move a task to a position.
    MoveTask {
        /// Column currently holding the task.
        from: ColumnName,
        /// Destination column.
        to: ColumnName,
        /// Task being moved.
        task_id: TaskId,
        /// Destination index.
        index: usize,
    },
    /// Replace the column order.
    ReorderColumns {
        /// Complete new order.
        column_order: Vec<ColumnName>,
    },
}

impl From<DragInstruction> for BoardAction {
    fn from(instruction: DragInstruction) -> Self {
        match instruction {
            DragInstruction::MoveTask {
                from,
                to,
                task_id,
                index,
            } => Self::MoveTaskAtIndex {
                from,
                to,
                task_id,
                index,
            },
            DragInstruction::ReorderColumns { column_order } => {
                Self::ReorderColumns { column_order }
            }
        }
    }
}

/// Resolves a drop into an instruction.
///
/// Returns `None` when the drop cannot be resolved against the board or
/// would leave everything where it is.
#[must_use]
pub fn resolve_drag(
    source: &DragSource,
    target: &DropTarget,
    state: &BoardState,
) -> Option<DragInstruction> {
    match source {
        DragSource::Column(column) => resolve_column_drag(column, target, state),
        DragSource::Task(task_id) => resolve_task_drag(task_id, target, state),
    }
}

fn resolve_column_drag(
    column: &ColumnName,
    target: &DropTarget,
    state: &BoardState,
) -> Option<DragInstruction> {
    let DropTarget::Column(over) = target else {
        return None;
    };
    let old_index = state.column_position(column)?;
    let new_index = state.column_position(over)?;
    if old_index == new_index {
        return None;
    }
    let mut column_order = state.column_order().to_vec();
    let moved = column_order.remove(old_index);
    column_order.insert(new_index, moved);
    Some(DragInstruction::ReorderColumns { column_order })
}

fn resolve_task_drag(
    task_id: &TaskId,
    target: &DropTarget,
    state: &BoardState,
) -> Option<DragInstruction> {
    let source = state.current_tasks().locate(task_id)?;
    let (to, index) = match target {
        DropTarget::Column(column) => {
            let tasks = state.current_tasks().tasks(column)?;
            (column.clone(), tasks.len())
        }
        DropTarget::Task(over) => {
            let location = state.current_tasks().locate(over)?;
            (location.column, location.index)
        }
    };
    if to == source.column && index == source.index {
        return None;
    }
    Some(DragInstruction::MoveTask {
        from: source.column,
        to,
        task_id: task_id.clone(),
        index,
    })
}
