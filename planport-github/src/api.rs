//! The project API seam used by the importer

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ProjectFields, Result};

/// Which project-item API a project speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSurface {
    /// Projects v2 with typed field configurations
    Typed,
    /// Pre-v2 `ProjectNext` with JSON-encoded field settings
    Legacy,
}

impl fmt::Display for ProjectSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectSurface::Typed => write!(f, "projects-v2"),
            ProjectSurface::Legacy => write!(f, "legacy project-next"),
        }
    }
}

/// Remote operations needed to import tasks into a project
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Fetch up to `first` field definitions and detect the project surface
    async fn project_fields(&self, project_id: &str, first: u32) -> Result<ProjectFields>;

    /// Create an issue, returning its node id
    async fn create_issue(&self, repository_id: &str, title: &str, body: &str) -> Result<String>;

    /// Add content (an issue) to the project, returning the item id
    async fn add_project_item(
        &self,
        surface: ProjectSurface,
        project_id: &str,
        content_id: &str,
    ) -> Result<String>;

    /// Set a single-select field on a project item
    async fn set_single_select(
        &self,
        surface: ProjectSurface,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<()>;
}
