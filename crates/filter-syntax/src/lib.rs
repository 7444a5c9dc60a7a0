pub mod ast;
pub mod builder;
pub mod errors;
pub mod parser;

pub use builder::parse;
