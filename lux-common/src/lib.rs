//! # Lux Common Library
//!
//! Shared code for the Lux collection search server and client:
//! - Error taxonomy
//! - Wire protocol types and codec
//! - Collection schema (fixture and tooling use)

pub mod db;
pub mod error;
pub mod protocol;

pub use error::{Error, Result};
pub use protocol::{ProducerRecord, SearchRequest, SearchResponse, SearchResult};
