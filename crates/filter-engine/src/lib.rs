pub mod compiled;
pub mod compiler;
pub mod context;
pub mod error;
pub mod function;
pub mod lambda;
pub mod literal;
pub mod navigation;
pub mod operator;
pub mod path;
pub mod visitor;

pub use compiler::{FilterCompiler, SqlFilterCompiler};
pub use error::FilterError;
