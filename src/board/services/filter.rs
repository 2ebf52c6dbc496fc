//! Search projection over a task list.

use crate::board::domain::TaskList;
use std::borrow::Cow;

/// Projects `tasks` onto the tasks matching `term`.
///
/// A blank term borrows the input unchanged. Otherwise every column of the
/// input is kept, holding only the tasks whose title or description
/// contains `term` case-insensitively, in their original order. Columns
/// without matches map to an empty list.
///
/// # Examples
///
/// ```
/// use kanban_board::board::domain::TaskList;
/// use kanban_board::board::services::filter_tasks;
///
/// let empty = TaskList::new();
/// assert_eq!(filter_tasks(&empty, "  ").as_ref(), &empty);
/// ```
#[must_use]
pub fn filter_tasks<'a>(tasks: &'a TaskList, term: &str) -> Cow<'a, TaskList> {
    if term.trim().is_empty() {
        return Cow::Borrowed(tasks);
    }
    let needle = term.to_lowercase();
    Cow::Owned(tasks.retain_tasks(|task| task.mentions(&needle)))
}
