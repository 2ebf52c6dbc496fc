//! Kanban board state engine.
//!
//! This crate models a board of named, reorderable columns holding tasks,
//! and the pure transition engine that applies every board mutation.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: columns, tasks, comments, and the board aggregate, with
//!   mutation primitives that keep task status and column membership in step
//! - **Services**: the reducer, the search projection, drag resolution, and
//!   the store that owns the state between dispatches
//!
//! # Modules
//!
//! - [`board`]: board model, transitions, and drag resolution

pub mod board;
