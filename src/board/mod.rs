//! Kanban board state engine.
//!
//! A board holds named, reorderable columns of tasks. All mutation goes
//! through [`services::BoardReducer`], a pure function from state and action
//! to the next state, and [`services::BoardStore`] owns the state between
//! dispatches. The module follows the hexagonal layout used elsewhere:
//!
//! - Domain types in [`domain`]
//! - Configuration in [`config`]
//! - Transition engine, search projection, and drag resolution in
//!   [`services`]

pub mod config;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
