//! Relata Core Library
//!
//! Core domain logic for the Relata related-content engine: content items,
//! relevance scoring and ranking, the SQLite content store, and the batch
//! driver that ties them together.

pub mod batch;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod similarity;
pub mod store;
