//! Unit tests for the value-level building blocks.

mod operators_tests;
mod unary_operators_tests;
