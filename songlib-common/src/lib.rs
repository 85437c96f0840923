//! # Song Library Common
//!
//! Shared code for the song library service:
//! - Song data model and the `songs` table store
//! - Database bootstrap (connection, schema, seed data)
//! - Bootstrap configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
