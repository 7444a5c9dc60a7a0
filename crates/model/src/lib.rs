pub mod core;
pub mod metadata;
