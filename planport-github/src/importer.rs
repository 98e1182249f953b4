//! Task import workflow
//!
//! Discovery runs once per import. Each task then goes through three
//! round trips in order (create issue, add to project, set status) before
//! the next task starts. Any API error stops the run; a missing status
//! field or an unknown status label only skips the status step.

use planport_core::{ImportTarget, Task, TaskList};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Error, ProjectApi, ProjectFields, ProjectSurface, Result, StatusField};

/// Options for an import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Log mutations instead of sending them
    pub dry_run: bool,
    /// Name of the single-select status field
    pub status_field: String,
    /// How many project fields to fetch during discovery
    pub field_page_size: u32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            status_field: "status".to_string(),
            field_page_size: 50,
        }
    }
}

impl ImportOptions {
    /// Options from the GitHub section of the configuration
    pub fn from_config(config: &planport_core::GitHubConfig, dry_run: bool) -> Self {
        Self {
            dry_run,
            status_field: config.status_field.clone(),
            field_page_size: config.field_page_size,
        }
    }
}

/// What discovery learned about the target project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSchema {
    /// All discovered fields
    pub fields: ProjectFields,
    /// The status field, if the project has one
    pub status: Option<StatusField>,
}

impl ProjectSchema {
    /// Surface used for item and field mutations
    pub fn surface(&self) -> ProjectSurface {
        self.fields.surface
    }
}

/// What happened to a task's status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StatusOutcome {
    /// The task had no status
    NotRequested,
    /// Status was set (or would be, in a dry run)
    Set { status: String, option_id: String },
    /// No option matched the task's status
    Unmatched { status: String },
    /// The project has no status field
    FieldMissing { status: String },
}

impl StatusOutcome {
    /// Whether a status was requested but not applied
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            StatusOutcome::Unmatched { .. } | StatusOutcome::FieldMissing { .. }
        )
    }
}

/// Result of importing one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedTask {
    /// Task title
    pub title: String,
    /// Created issue id (None in a dry run)
    pub issue_id: Option<String>,
    /// Created project item id (None in a dry run)
    pub item_id: Option<String>,
    /// Status handling
    pub status: StatusOutcome,
}

/// Result of an import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Per-task results, in input order
    pub tasks: Vec<ImportedTask>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl ImportSummary {
    /// Number of issues created
    pub fn created(&self) -> usize {
        self.tasks.iter().filter(|t| t.issue_id.is_some()).count()
    }

    /// Number of statuses set
    pub fn statuses_set(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t.status, StatusOutcome::Set { .. }))
            .count()
    }

    /// Number of requested statuses that were skipped
    pub fn statuses_skipped(&self) -> usize {
        self.tasks.iter().filter(|t| t.status.is_skipped()).count()
    }
}

/// Imports tasks into a repository and project through a [`ProjectApi`]
pub struct TaskImporter<'a, A: ProjectApi + ?Sized> {
    api: &'a A,
    target: ImportTarget,
    options: ImportOptions,
}

impl<'a, A: ProjectApi + ?Sized> TaskImporter<'a, A> {
    /// Create an importer for `target`
    pub fn new(api: &'a A, target: ImportTarget, options: ImportOptions) -> Self {
        Self {
            api,
            target,
            options,
        }
    }

    /// Fetch project fields and locate the status field
    pub async fn discover(&self) -> Result<ProjectSchema> {
        let fields = self
            .api
            .project_fields(&self.target.project_id, self.options.field_page_size)
            .await?;

        let status = StatusField::find(&fields, &self.options.status_field);
        match &status {
            Some(field) => info!(
                field = %field.field_name,
                options = ?field.option_names(),
                surface = %fields.surface,
                "Status field found"
            ),
            None => warn!(
                field = %self.options.status_field,
                "Status field not found. Tasks will be added without status."
            ),
        }

        Ok(ProjectSchema { fields, status })
    }

    /// Locate the status field only
    pub async fn discover_status_field(&self) -> Result<Option<StatusField>> {
        Ok(self.discover().await?.status)
    }

    /// Create the issue, add it to the project and set its status
    pub async fn import_task(&self, task: &Task, schema: &ProjectSchema) -> Result<ImportedTask> {
        info!(title = %task.title, "Creating issue");

        let status = resolve_status(task, schema.status.as_ref());
        match &status {
            StatusOutcome::Unmatched { status } => warn!(
                title = %task.title,
                status = %status,
                "Status option not found in project. Skipping status."
            ),
            StatusOutcome::FieldMissing { status } => debug!(
                title = %task.title,
                status = %status,
                "No status field, skipping status"
            ),
            _ => {}
        }

        if self.options.dry_run {
            info!(title = %task.title, status = ?status, "[DRY RUN] Would create issue and project item");
            return Ok(ImportedTask {
                title: task.title.clone(),
                issue_id: None,
                item_id: None,
                status,
            });
        }

        let issue_id = self
            .api
            .create_issue(&self.target.repository_id, &task.title, task.body_text())
            .await?;
        debug!(title = %task.title, issue_id = %issue_id, "Created issue");

        let item_id = self
            .api
            .add_project_item(schema.surface(), &self.target.project_id, &issue_id)
            .await?;
        debug!(title = %task.title, item_id = %item_id, "Added issue to project");

        if let (StatusOutcome::Set { status, option_id }, Some(field)) =
            (&status, schema.status.as_ref())
        {
            self.api
                .set_single_select(
                    field.surface,
                    &self.target.project_id,
                    &item_id,
                    &field.field_id,
                    option_id,
                )
                .await?;
            info!(title = %task.title, status = %status, "Status set");
        }

        info!(title = %task.title, "Task added");

        Ok(ImportedTask {
            title: task.title.clone(),
            issue_id: Some(issue_id),
            item_id: Some(item_id),
            status,
        })
    }

    /// Discover the project, then import every task in order
    pub async fn run(&self, tasks: &TaskList) -> Result<ImportSummary> {
        info!(
            repository_id = %self.target.repository_id,
            project_id = %self.target.project_id,
            tasks = tasks.len(),
            dry_run = self.options.dry_run,
            "Starting import"
        );

        let schema = self.discover().await?;
        let mut summary = ImportSummary {
            tasks: Vec::with_capacity(tasks.len()),
            dry_run: self.options.dry_run,
        };

        for task in tasks {
            let imported = self
                .import_task(task, &schema)
                .await
                .map_err(|e| Error::Task {
                    title: task.title.clone(),
                    source: Box::new(e),
                })?;
            summary.tasks.push(imported);
        }

        info!(
            created = summary.created(),
            statuses_set = summary.statuses_set(),
            statuses_skipped = summary.statuses_skipped(),
            "All tasks imported"
        );

        Ok(summary)
    }
}

/// Decide what to do with a task's status before any mutation is sent
fn resolve_status(task: &Task, field: Option<&StatusField>) -> StatusOutcome {
    let Some(requested) = task.requested_status() else {
        return StatusOutcome::NotRequested;
    };

    let Some(field) = field else {
        return StatusOutcome::FieldMissing {
            status: requested.to_string(),
        };
    };

    match field.option_id(requested) {
        Some(option_id) => StatusOutcome::Set {
            status: requested.to_string(),
            option_id: option_id.to_string(),
        },
        None => StatusOutcome::Unmatched {
            status: requested.to_string(),
        },
    }
}
