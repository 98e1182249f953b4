//! [`ProjectApi`] over the GitHub GraphQL endpoint

use std::future::Future;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::fields::{legacy_fields, typed_fields, FieldsData, LegacyFieldNode, TypedFieldNode};
use crate::{queries, Error, GraphQlClient, ProjectApi, ProjectFields, ProjectSurface, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateIssueData {
    create_issue: CreateIssuePayload,
}

#[derive(Debug, Deserialize)]
struct CreateIssuePayload {
    issue: NodeId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemData {
    add_project_v2_item_by_id: AddItemPayload,
}

#[derive(Debug, Deserialize)]
struct AddItemPayload {
    item: NodeId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyAddItemData {
    add_project_next_item: LegacyAddItemPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyAddItemPayload {
    project_next_item: NodeId,
}

#[derive(Debug, Deserialize)]
struct NodeId {
    id: String,
}

/// Pick the project surface: typed v2 fields first, legacy fields only if
/// the node is not a `ProjectV2`, `MissingData` if it is neither.
async fn detect_fields<T, L, LF>(project_id: &str, typed: T, legacy: L) -> Result<ProjectFields>
where
    T: Future<Output = Result<FieldsData<TypedFieldNode>>>,
    L: FnOnce() -> LF,
    LF: Future<Output = Result<FieldsData<LegacyFieldNode>>>,
{
    if let Some(fields) = typed_fields(typed.await?) {
        info!(count = fields.fields.len(), "Discovered Projects v2 fields");
        return Ok(fields);
    }

    debug!(project_id, "Not a Projects v2 node, trying legacy fields");
    if let Some(fields) = legacy_fields(legacy().await?) {
        info!(count = fields.fields.len(), "Discovered legacy project fields");
        return Ok(fields);
    }

    Err(Error::MissingData(format!(
        "project fields for {} (not a Projects v2 or legacy project)",
        project_id
    )))
}

#[async_trait]
impl ProjectApi for GraphQlClient {
    async fn project_fields(&self, project_id: &str, first: u32) -> Result<ProjectFields> {
        debug!(project_id, first, "Fetching project fields");

        let variables = json!({ "projectId": project_id, "first": first });
        let vars = &variables;

        detect_fields(
            project_id,
            self.execute::<FieldsData<TypedFieldNode>>(queries::PROJECT_FIELDS, vars),
            move || self.execute::<FieldsData<LegacyFieldNode>>(queries::LEGACY_PROJECT_FIELDS, vars),
        )
        .await
    }

    async fn create_issue(&self, repository_id: &str, title: &str, body: &str) -> Result<String> {
        debug!(title, "Creating issue");

        let variables = json!({
            "repositoryId": repository_id,
            "title": title,
            "body": body,
        });

        let data: CreateIssueData = self.execute(queries::CREATE_ISSUE, &variables).await?;
        Ok(data.create_issue.issue.id)
    }

    async fn add_project_item(
        &self,
        surface: ProjectSurface,
        project_id: &str,
        content_id: &str,
    ) -> Result<String> {
        debug!(%surface, content_id, "Adding project item");

        let variables = json!({ "projectId": project_id, "contentId": content_id });

        match surface {
            ProjectSurface::Typed => {
                let data: AddItemData = self.execute(queries::ADD_PROJECT_ITEM, &variables).await?;
                Ok(data.add_project_v2_item_by_id.item.id)
            }
            ProjectSurface::Legacy => {
                let data: LegacyAddItemData = self
                    .execute(queries::LEGACY_ADD_PROJECT_ITEM, &variables)
                    .await?;
                Ok(data.add_project_next_item.project_next_item.id)
            }
        }
    }

    async fn set_single_select(
        &self,
        surface: ProjectSurface,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<()> {
        debug!(%surface, item_id, field_id, option_id, "Setting single-select field");

        let variables = json!({
            "projectId": project_id,
            "itemId": item_id,
            "fieldId": field_id,
            "optionId": option_id,
        });

        let query = match surface {
            ProjectSurface::Typed => queries::SET_SINGLE_SELECT,
            ProjectSurface::Legacy => queries::LEGACY_SET_FIELD,
        };

        let _: serde_json::Value = self.execute(query, &variables).await?;
        Ok(())
    }
}
