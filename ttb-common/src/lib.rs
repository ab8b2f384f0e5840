//! # TTB Common Library
//!
//! Shared code for the TTB label tooling:
//! - Error and result types
//! - TOML configuration resolution and loading
//! - Logging configuration

pub mod config;
pub mod error;

pub use error::{Error, Result};
