//! Planport Core - task files, configuration and secrets
//!
//! This crate holds everything the importer needs before it talks to
//! GitHub: the learning-plan task model, the layered configuration and the
//! token lookup.

pub mod config;
pub mod error;
pub mod secrets;
pub mod task;

pub use config::{Config, GitHubConfig, ImportConfig, ImportTarget};
pub use error::{Error, Result};
pub use secrets::{GitHubSecrets, Secrets};
pub use task::{Task, TaskList};
