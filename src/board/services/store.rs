//! Owned board store: the single writer of board state.

use super::{
    BoardReducer, DragInstruction, DragSource, DropTarget, TransitionOutcome, resolve_drag,
};
use crate::board::{
    config::BoardConfig,
    domain::{
        BoardAction, BoardState, ColumnName, Comment, Task, TaskId, TaskList, TaskLocation,
        UserProfile,
    },
};
use mockable::{Clock, DefaultClock};
use tracing::{debug, trace};

/// A drag gesture in flight.
///
/// The session only records what was lifted for presentation. It never
/// touches board state and is consumed when the gesture ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    source: DragSource,
    lifted: Option<Task>,
}

impl DragSession {
    /// Returns the lifted element.
    #[must_use]
    pub const fn source(&self) -> &DragSource {
        &self.source
    }

    /// Returns a copy of the lifted task, when a task is being dragged.
    #[must_use]
    pub const fn lifted_task(&self) -> Option<&Task> {
        self.lifted.as_ref()
    }
}

/// Owns the board state and routes actions through the reducer.
///
/// Every dispatch runs to completion and swaps in a whole new state, so a
/// reader never observes a partially applied action.
#[derive(Debug)]
pub struct BoardStore<C = DefaultClock>
where
    C: Clock,
{
    state: BoardState,
    reducer: BoardReducer,
    clock: C,
}

impl BoardStore<DefaultClock> {
    /// Creates a store for a board initialized with `tasks`, using the
    /// default configuration and the system clock.
    #[must_use]
    pub fn new(tasks: TaskList) -> Self {
        Self::with_clock(tasks, BoardConfig::default(), DefaultClock)
    }
}

impl<C> BoardStore<C>
where
    C: Clock,
{
    /// Creates a store with explicit configuration and clock.
    #[must_use]
    pub fn with_clock(tasks: TaskList, config: BoardConfig, clock: C) -> Self {
        Self::from_state(BoardState::initial(tasks), config, clock)
    }

    /// Creates a store around an existing state, e.g. one restored from a
    /// fixture.
    #[must_use]
    pub const fn from_state(state: BoardState, config: BoardConfig, clock: C) -> Self {
        Self {
            state,
            reducer: BoardReducer::new(config),
            clock,
        }
    }

    /// Returns the current board state.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns the store configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        self.reducer.config()
    }

    /// Consumes the store, returning the board state.
    #[must_use]
    pub fn into_state(self) -> BoardState {
        self.state
    }

    /// Applies an action and reports whether it took effect.
    pub fn dispatch(&mut self, action: BoardAction) -> TransitionOutcome {
        let kind = action.kind();
        let current = std::mem::take(&mut self.state);
        let (next, outcome) = self.reducer.apply(current, action).into_parts();
        self.state = next;
        match &outcome {
            TransitionOutcome::Applied => debug!(action = kind, "board action applied"),
            TransitionOutcome::Rejected(reason) => {
                debug!(action = kind, %reason, "board action rejected");
            }
        }
        outcome
    }

    /// Returns the tasks to display: the search projection of the board.
    #[must_use]
    pub const fn visible_tasks(&self) -> &TaskList {
        self.state.filtered_tasks()
    }

    /// Finds a task on the board.
    #[must_use]
    pub fn find_task(&self, id: &TaskId) -> Option<(TaskLocation, &Task)> {
        self.state.find_task(id)
    }

    /// Returns the share of all tasks sitting in the progress column, as a
    /// rounded percentage.
    ///
    /// When the configured progress column does not exist the last column
    /// in rendering order is counted instead. An empty board reports zero.
    #[must_use]
    pub fn progress(&self) -> u8 {
        let tasks = self.state.current_tasks();
        let total = tasks.task_count();
        let progress_column = ColumnName::new(&self.config().progress_column)
            .ok()
            .filter(|column| tasks.contains_column(column))
            .or_else(|| self.state.column_order().last().cloned());
        let in_progress = progress_column
            .and_then(|column| tasks.tasks(&column).map(<[Task]>::len))
            .unwrap_or_default();
        let doubled_total = total.saturating_mul(2);
        let rounded = in_progress
            .saturating_mul(200)
            .saturating_add(total)
            .checked_div(doubled_total)
            .unwrap_or_default();
        u8::try_from(rounded).unwrap_or(100)
    }

    /// Removes a column using the configured removal policy.
    pub fn remove_column(&mut self, column_name: ColumnName) -> TransitionOutcome {
        let policy = self.config().column_removal.clone();
        self.dispatch(BoardAction::RemoveColumn {
            column_name,
            policy,
        })
    }

    /// Adds a new comment, stamped with the store clock, to a task.
    pub fn add_comment(
        &mut self,
        column: ColumnName,
        task_id: TaskId,
        author: UserProfile,
        content: impl Into<String>,
    ) -> TransitionOutcome {
        let comment = Comment::new(author, content, &self.clock);
        self.dispatch(BoardAction::AddComment {
            column,
            task_id,
            comment,
        })
    }

    /// Resolves a drop against the current board without applying it.
    #[must_use]
    pub fn resolve_drag(&self, source: &DragSource, target: &DropTarget) -> Option<DragInstruction> {
        resolve_drag(source, target, &self.state)
    }

    /// Starts a drag gesture for the element with the given identifier.
    ///
    /// Returns `None` when the identifier is blank.
    #[must_use]
    pub fn begin_drag(&self, source_id: &str) -> Option<DragSession> {
        let source = DragSource::classify(source_id, &self.state)?;
        let lifted = match &source {
            DragSource::Task(task_id) => self.state.find_task(task_id).map(|(_, task)| task.clone()),
            DragSource::Column(_) => None,
        };
        trace!(source = source_id, "drag started");
        Some(DragSession { source, lifted })
    }

    /// Ends a drag gesture, dispatching the resolved instruction.
    ///
    /// The session is discarded whether or not the drop resolves. Returns
    /// `None` when nothing was dispatched: the drop landed outside any
    /// target or resolved to no instruction.
    pub fn finish_drag(
        &mut self,
        session: DragSession,
        target: Option<DropTarget>,
    ) -> Option<TransitionOutcome> {
        let DragSession { source, .. } = session;
        let instruction = target.and_then(|over| resolve_drag(&source, &over, &self.state));
        trace!(resolved = instruction.is_some(), "drag finished");
        instruction.map(|resolved| self.dispatch(resolved.into()))
    }
}
