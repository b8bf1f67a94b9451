//! Search and ranking engine for a cloud resource dashboard.
//!
//! The dashboard fetches its resource catalog elsewhere and hands complete
//! snapshots to [`search::SearchEngine`], which answers free-text and
//! structured queries and produces autocomplete suggestions.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;

pub use error::{AppError, Result};
