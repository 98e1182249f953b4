//! Planport GitHub - GitHub Projects integration for planport
//!
//! This crate talks to the GitHub GraphQL API to discover project fields,
//! create issues, add them to a project board and set their status.

mod api;
mod client;
mod error;
mod fields;
mod importer;
mod projects;
mod queries;

pub use api::{ProjectApi, ProjectSurface};
pub use client::GraphQlClient;
pub use error::{Error, Result};
pub use fields::{FieldKind, FieldOption, ProjectField, ProjectFields, StatusField};
pub use importer::{
    ImportOptions, ImportSummary, ImportedTask, ProjectSchema, StatusOutcome, TaskImporter,
};
