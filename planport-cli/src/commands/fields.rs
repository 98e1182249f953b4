//! Project field inspection command

use clap::Args;
use planport_core::{config::require, Config, Secrets};
use planport_github::{GraphQlClient, ProjectApi, StatusField};

/// List the fields defined on a project
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Project node id
    #[arg(long, env = "PROJECT_ID")]
    pub project_id: Option<String>,
}

impl FieldsArgs {
    /// Execute the fields command
    pub async fn execute(&self, config: &Config, token: Option<String>) -> anyhow::Result<()> {
        let project_id = require(self.project_id.clone(), "PROJECT_ID (--project-id)")?;

        let token = Secrets::resolve_token(token)?;
        let client = GraphQlClient::from_config(config, token)?;

        let fields = client
            .project_fields(&project_id, config.github.field_page_size)
            .await?;
        let status = StatusField::find(&fields, &config.github.status_field);

        println!("Project {} ({})", project_id, fields.surface);
        println!();

        for field in &fields.fields {
            let marker = match &status {
                Some(s) if s.field_id == field.id => "*",
                _ => " ",
            };
            println!("{} {:<14} {} ({})", marker, field.kind.to_string(), field.name, field.id);
            for option in &field.options {
                println!("      - {} ({})", option.name, option.id);
            }
        }

        println!();
        match status {
            Some(s) => println!("Status field: {} ({} options)", s.field_name, s.options.len()),
            None => println!(
                "No single-select field named \"{}\"; statuses will be skipped",
                config.github.status_field
            ),
        }

        Ok(())
    }
}
