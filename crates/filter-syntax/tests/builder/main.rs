//! AST builder tests
//!
//! These tests verify that `$filter` text is correctly parsed into a typed
//! AST structure.

mod calls;
mod expressions;
mod members;
