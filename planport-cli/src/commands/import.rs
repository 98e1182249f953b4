//! Task import command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use planport_core::{Config, ImportTarget, Secrets, TaskList};
use planport_github::{
    GraphQlClient, ImportOptions, ImportSummary, ImportedTask, StatusOutcome, TaskImporter,
};

/// Import tasks from a JSON file into a repository and project
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Task file (defaults to the configured input, learning-plan.json)
    pub file: Option<PathBuf>,

    /// Repository node id
    #[arg(long, env = "REPO_ID")]
    pub repo_id: Option<String>,

    /// Project node id
    #[arg(long, env = "PROJECT_ID")]
    pub project_id: Option<String>,

    /// Resolve statuses and log what would be created without creating it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config: &Config, token: Option<String>) -> anyhow::Result<()> {
        let target = ImportTarget::resolve(self.repo_id.clone(), self.project_id.clone())?;
        tracing::info!(repository_id = %target.repository_id, project_id = %target.project_id, "Import target");

        let path = self.file.clone().unwrap_or_else(|| config.import.input.clone());
        let tasks = TaskList::load(&path)
            .with_context(|| format!("Failed to load tasks from {}", path.display()))?;

        let summary = if tasks.is_empty() {
            tracing::warn!(path = %path.display(), "Task file has no items, nothing to import");
            ImportSummary {
                tasks: Vec::new(),
                dry_run: self.dry_run,
            }
        } else {
            let token = Secrets::resolve_token(token)?;
            let client = GraphQlClient::from_config(config, token)?;
            let options = ImportOptions::from_config(&config.github, self.dry_run);
            TaskImporter::new(&client, target, options)
                .run(&tasks)
                .await?
        };

        if self.json {
            println!("{}", render_json(&summary)?);
        } else {
            print_summary(&summary);
        }

        Ok(())
    }
}

/// Summary as a single JSON document; logs go to stderr so stdout holds only this
fn render_json(summary: &ImportSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

fn print_summary(summary: &ImportSummary) {
    println!();
    if summary.dry_run {
        println!("Dry run: {} task(s) checked, nothing created", summary.tasks.len());
    } else {
        println!("All tasks imported successfully!");
    }
    println!();

    for task in &summary.tasks {
        println!("  {}", describe(task));
    }

    println!();
    println!(
        "{} created, {} status(es) set, {} status(es) skipped",
        summary.created(),
        summary.statuses_set(),
        summary.statuses_skipped()
    );
}

fn describe(task: &ImportedTask) -> String {
    let status = match &task.status {
        StatusOutcome::NotRequested => String::new(),
        StatusOutcome::Set { status, .. } => format!(" [status: {}]", status),
        StatusOutcome::Unmatched { status } => {
            format!(" [status \"{}\" not found, skipped]", status)
        }
        StatusOutcome::FieldMissing { status } => {
            format!(" [no status field, \"{}\" skipped]", status)
        }
    };

    match &task.item_id {
        Some(item) => format!("+ {} ({}){}", task.title, item, status),
        None => format!("~ {}{}", task.title, status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(item_id: Option<&str>, status: StatusOutcome) -> ImportedTask {
        ImportedTask {
            title: "Learn X".to_string(),
            issue_id: item_id.map(|_| "I_1".to_string()),
            item_id: item_id.map(|s| s.to_string()),
            status,
        }
    }

    #[test]
    fn test_describe_created_with_status() {
        let line = describe(&task(
            Some("PVTI_1"),
            StatusOutcome::Set {
                status: "In Progress".to_string(),
                option_id: "O_1".to_string(),
            },
        ));
        assert_eq!(line, "+ Learn X (PVTI_1) [status: In Progress]");
    }

    #[test]
    fn test_json_output_is_one_document() {
        let summary = ImportSummary {
            tasks: vec![
                task(Some("PVTI_1"), StatusOutcome::NotRequested),
                task(
                    None,
                    StatusOutcome::FieldMissing {
                        status: "Todo".to_string(),
                    },
                ),
            ],
            dry_run: false,
        };

        let out = render_json(&summary).unwrap();
        assert!(out.starts_with('{'));
        assert!(out.ends_with('}'));

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["tasks"][0]["item_id"], "PVTI_1");
        assert_eq!(parsed["tasks"][1]["status"]["outcome"], "field_missing");
        assert_eq!(parsed["dry_run"], false);
    }

    #[test]
    fn test_describe_dry_run_unmatched() {
        let line = describe(&task(
            None,
            StatusOutcome::Unmatched {
                status: "Blocked".to_string(),
            },
        ));
        assert_eq!(line, "~ Learn X [status \"Blocked\" not found, skipped]");
    }
}
