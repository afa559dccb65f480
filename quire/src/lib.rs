//! Expose quire's internal API for use in testing. The binary is the
//! supported interface; this crate root exists so the CLI, configuration and
//! build steps can be exercised from integration tests.
pub mod build;
pub mod cli;
pub mod config;
pub mod error;
