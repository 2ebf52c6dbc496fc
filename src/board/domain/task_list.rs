//! Column-to-task mapping with invariant-preserving mutation primitives.
//!
//! [`TaskList`] keeps its columns in insertion order so an initial board
//! reproduces its original column order on reset. Every primitive that
//! places a task into a column rewrites the task's status to that column.

use super::{BoardDomainError, ColumnName, Task, TaskId};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Position of a task on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskLocation {
    /// Column currently holding the task.
    pub column: ColumnName,
    /// Zero-based index within the column.
    pub index: usize,
}

/// Mapping from column name to its ordered task sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    columns: Vec<(ColumnName, Vec<Task>)>,
}

impl TaskList {
    /// Creates a task list with no columns.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Builds a task list from columns in order.
    ///
    /// Each task's status is rewritten to the column that holds it. A column
    /// named twice keeps its first position and receives the later tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateTaskId`] when a task identifier
    /// occurs more than once.
    pub fn from_columns<I>(columns: I) -> Result<Self, BoardDomainError>
    where
        I: IntoIterator<Item = (ColumnName, Vec<Task>)>,
    {
        let mut list = Self::new();
        let mut seen = HashSet::new();
        for (name, tasks) in columns {
            if !list.contains_column(&name) {
                list.push_column(name.clone());
            }
            for task in tasks {
                if !seen.insert(task.id().clone()) {
                    return Err(BoardDomainError::DuplicateTaskId(task.id().clone()));
                }
                list.insert_task(&name, usize::MAX, task);
            }
        }
        Ok(list)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when the list has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|(_, tasks)| tasks.len()).sum()
    }

    /// Iterates column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &ColumnName> {
        self.columns.iter().map(|(name, _)| name)
    }

    /// Iterates columns with their tasks in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&ColumnName, &[Task])> {
        self.columns
            .iter()
            .map(|(name, tasks)| (name, tasks.as_slice()))
    }

    /// Returns `true` when the column exists.
    #[must_use]
    pub fn contains_column(&self, name: &ColumnName) -> bool {
        self.position(name).is_some()
    }

    /// Returns the tasks of a column, or `None` when the column is absent.
    #[must_use]
    pub fn tasks(&self, name: &ColumnName) -> Option<&[Task]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, tasks)| tasks.as_slice())
    }

    /// Finds a task anywhere on the board.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<(TaskLocation, &Task)> {
        self.columns.iter().find_map(|(column, tasks)| {
            tasks
                .iter()
                .enumerate()
                .find(|(_, task)| task.id() == id)
                .map(|(index, task)| {
                    (
                        TaskLocation {
                            column: column.clone(),
                            index,
                        },
                        task,
                    )
                })
        })
    }

    /// Returns where a task sits on the board.
    #[must_use]
    pub fn locate(&self, id: &TaskId) -> Option<TaskLocation> {
        self.find(id).map(|(location, _)| location)
    }

    /// Returns `true` when any column holds a task with this identifier.
    #[must_use]
    pub fn contains_task(&self, id: &TaskId) -> bool {
        self.find(id).is_some()
    }

    fn position(&self, name: &ColumnName) -> Option<usize> {
        self.columns.iter().position(|(column, _)| column == name)
    }

    pub(crate) fn column_mut(&mut self, name: &ColumnName) -> Option<&mut Vec<Task>> {
        self.columns
            .iter_mut()
            .find(|(column, _)| column == name)
            .map(|(_, tasks)| tasks)
    }

    /// Appends an empty column. Existing columns are left as they are.
    pub(crate) fn push_column(&mut self, name: ColumnName) {
        if !self.contains_column(&name) {
            self.columns.push((name, Vec::new()));
        }
    }

    /// Removes a column, handing back the tasks it held.
    pub(crate) fn remove_column(&mut self, name: &ColumnName) -> Option<Vec<Task>> {
        let index = self.position(name)?;
        Some(self.columns.remove(index).1)
    }

    /// Renames a column in place, rewriting the status of every task it
    /// holds. Returns `false` when `old` is absent.
    pub(crate) fn rename_column(&mut self, old: &ColumnName, new: &ColumnName) -> bool {
        let Some((name, tasks)) = self.columns.iter_mut().find(|(column, _)| column == old) else {
            return false;
        };
        new.clone_into(name);
        for task in tasks.iter_mut() {
            task.set_status(new.clone());
        }
        true
    }

    /// Inserts a task before `index` in `column`; an index at or past the end
    /// appends. Returns `false` when the column is absent.
    pub(crate) fn insert_task(&mut self, column: &ColumnName, index: usize, mut task: Task) -> bool {
        let Some(tasks) = self.column_mut(column) else {
            return false;
        };
        task.set_status(column.clone());
        let at = index.min(tasks.len());
        tasks.insert(at, task);
        true
    }

    /// Removes a task from `column`, returning its former index and value.
    pub(crate) fn take_task(&mut self, column: &ColumnName, id: &TaskId) -> Option<(usize, Task)> {
        let tasks = self.column_mut(column)?;
        let index = tasks.iter().position(|task| task.id() == id)?;
        Some((index, tasks.remove(index)))
    }

    pub(crate) fn task_mut(&mut self, column: &ColumnName, id: &TaskId) -> Option<&mut Task> {
        self.column_mut(column)?
            .iter_mut()
            .find(|task| task.id() == id)
    }

    /// Builds a list with the same columns, keeping only the tasks accepted
    /// by `keep`.
    pub(crate) fn retain_tasks(&self, mut keep: impl FnMut(&Task) -> bool) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, tasks)| {
                let kept = tasks.iter().filter(|task| keep(task)).cloned().collect();
                (name.clone(), kept)
            })
            .collect();
        Self { columns }
    }
}

impl Serialize for TaskList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, tasks) in &self.columns {
            map.serialize_entry(name, tasks)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TaskList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TaskListVisitor)
    }
}

struct TaskListVisitor;

impl<'de> Visitor<'de> for TaskListVisitor {
    type Value = TaskList;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map from column name to a task sequence")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut columns = Vec::with_capacity(access.size_hint().unwrap_or_default());
        while let Some((name, tasks)) = access.next_entry::<ColumnName, Vec<Task>>()? {
            columns.push((name, tasks));
        }
        TaskList::from_columns(columns).map_err(serde::de::Error::custom)
    }
}
