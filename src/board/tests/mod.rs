//! Unit tests for the board module.

mod reducer_tests;
