//! Collection database schema

pub mod schema;

pub use schema::*;
