//! Test Helper Utilities
//!
//! Shared fixtures for ttb-verify integration tests. Each test target
//! uses a different subset, so targets declare `mod helpers` with
//! `#[allow(dead_code)]`.

pub mod label_fixtures;
pub mod mock_provider;
