//! Grammar tests
//!
//! These tests run the pest grammar directly and only check which inputs
//! are accepted and how the top-level pairs are shaped.

mod literals;
mod operators;
mod paths;
