//! Board services: search projection, drag resolution, the transition
//! engine, and the owning store.

mod filter;
mod reducer;
mod resolver;
mod store;

pub use filter::filter_tasks;
pub use reducer::{BoardReducer, Transition, TransitionOutcome, reduce};
pub use resolver::{DragInstruction, DragSource, DropTarget, resolve_drag};
pub use store::{BoardStore, DragSession};
