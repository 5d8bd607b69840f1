//! lux - terminal client for the collection search server
//!
//! Collects filter text, sends it on a fresh connection per query and
//! renders the reply as a fixed-width table.

pub mod client;
pub mod prompt;
pub mod table;

pub use client::LuxClient;
