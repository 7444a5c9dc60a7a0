pub mod association;
pub mod entity;
pub mod enums;
pub mod error;
pub mod function;
pub mod provider;
pub mod schema;
