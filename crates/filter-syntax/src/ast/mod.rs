pub mod function;
pub mod literal;
pub mod member;
pub mod node;
pub mod operator;
