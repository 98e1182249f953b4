//! Project field descriptors and status-field resolution

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ProjectSurface;

/// Kind of a project field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    SingleSelect,
    Text,
    Number,
    Date,
    Iteration,
    Assignees,
    /// Any other built-in kind (title, labels, milestone, ...)
    Other(String),
}

impl FieldKind {
    /// Map a GitHub `dataType` value
    pub fn from_data_type(data_type: &str) -> Self {
        match data_type {
            "SINGLE_SELECT" => FieldKind::SingleSelect,
            "TEXT" => FieldKind::Text,
            "NUMBER" => FieldKind::Number,
            "DATE" => FieldKind::Date,
            "ITERATION" => FieldKind::Iteration,
            "ASSIGNEES" => FieldKind::Assignees,
            other => FieldKind::Other(other.to_ascii_lowercase()),
        }
    }

    /// Fallback when only the GraphQL type name is known
    fn from_typename(typename: &str) -> Self {
        match typename {
            "ProjectV2SingleSelectField" => FieldKind::SingleSelect,
            "ProjectV2IterationField" => FieldKind::Iteration,
            other => FieldKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::SingleSelect => write!(f, "single-select"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Number => write!(f, "number"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::Iteration => write!(f, "iteration"),
            FieldKind::Assignees => write!(f, "assignees"),
            FieldKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// One option of a single-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: String,
    pub name: String,
}

/// A field defined on a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectField {
    /// Field node id
    pub id: String,
    /// Display name
    pub name: String,
    /// Field kind
    pub kind: FieldKind,
    /// Options in board order (single-select only)
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

impl ProjectField {
    /// Whether this is a single-select field
    pub fn is_single_select(&self) -> bool {
        self.kind == FieldKind::SingleSelect
    }
}

/// Every field discovered on a project, with the surface it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub surface: ProjectSurface,
    pub fields: Vec<ProjectField>,
}

/// The single-select field used for task status, with its lookup map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusField {
    /// Field node id
    pub field_id: String,
    /// Field name as shown on the board
    pub field_name: String,
    /// Surface that owns the field
    pub surface: ProjectSurface,
    /// Options in board order
    pub options: Vec<FieldOption>,
    /// Lower-cased option name -> option id
    map: HashMap<String, String>,
}

impl StatusField {
    /// Find the single-select field whose name matches `name` case-insensitively
    pub fn find(fields: &ProjectFields, name: &str) -> Option<Self> {
        let wanted = name.trim().to_lowercase();
        let field = fields
            .fields
            .iter()
            .find(|f| f.is_single_select() && f.name.to_lowercase() == wanted)?;

        // Later options overwrite earlier ones with the same lower-cased name
        let map = field
            .options
            .iter()
            .map(|o| (o.name.to_lowercase(), o.id.clone()))
            .collect();

        debug!(field = %field.name, options = field.options.len(), "Found status field");

        Some(Self {
            field_id: field.id.clone(),
            field_name: field.name.clone(),
            surface: fields.surface,
            options: field.options.clone(),
            map,
        })
    }

    /// Option id for a status label, compared case-insensitively
    pub fn option_id(&self, status: &str) -> Option<&str> {
        self.map
            .get(&status.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Option names in board order
    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }
}

// Raw response shapes shared by both field queries

#[derive(Debug, Deserialize)]
pub(crate) struct FieldsData<F> {
    node: Option<FieldsNode<F>>,
}

#[derive(Debug, Deserialize)]
struct FieldsNode<F> {
    #[serde(rename = "__typename")]
    typename: String,
    fields: Option<FieldConnection<F>>,
}

#[derive(Debug, Deserialize)]
struct FieldConnection<F> {
    nodes: Vec<Option<F>>,
}

impl<F> FieldsData<F> {
    /// Field nodes, or `None` when the node is not a project of this surface
    fn into_nodes(self) -> Option<Vec<F>> {
        let node = self.node?;
        match node.fields {
            Some(conn) => Some(conn.nodes.into_iter().flatten().collect()),
            None => {
                debug!(typename = %node.typename, "Node has no fields on this surface");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TypedFieldNode {
    #[serde(rename = "__typename")]
    typename: String,
    id: Option<String>,
    name: Option<String>,
    data_type: Option<String>,
    #[serde(default)]
    options: Vec<FieldOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyFieldNode {
    id: String,
    name: String,
    data_type: Option<String>,
    settings: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LegacySettings {
    #[serde(default)]
    options: Vec<FieldOption>,
}

/// Convert a typed fields response, `None` if the node is not a `ProjectV2`
pub(crate) fn typed_fields(data: FieldsData<TypedFieldNode>) -> Option<ProjectFields> {
    let fields = data
        .into_nodes()?
        .into_iter()
        .filter_map(|node| {
            let (id, name) = (node.id?, node.name?);
            let kind = match node.data_type.as_deref() {
                Some(data_type) => FieldKind::from_data_type(data_type),
                None => FieldKind::from_typename(&node.typename),
            };
            Some(ProjectField {
                id,
                name,
                kind,
                options: node.options,
            })
        })
        .collect();

    Some(ProjectFields {
        surface: ProjectSurface::Typed,
        fields,
    })
}

/// Convert a legacy fields response, `None` if the node is not a `ProjectNext`
pub(crate) fn legacy_fields(data: FieldsData<LegacyFieldNode>) -> Option<ProjectFields> {
    let fields = data
        .into_nodes()?
        .into_iter()
        .map(|node| {
            let kind = node
                .data_type
                .as_deref()
                .map(FieldKind::from_data_type)
                .unwrap_or_else(|| FieldKind::Other("unknown".to_string()));
            let options = if kind == FieldKind::SingleSelect {
                parse_legacy_settings(&node.name, node.settings.as_deref())
            } else {
                Vec::new()
            };
            ProjectField {
                id: node.id,
                name: node.name,
                kind,
                options,
            }
        })
        .collect();

    Some(ProjectFields {
        surface: ProjectSurface::Legacy,
        fields,
    })
}

fn parse_legacy_settings(field: &str, settings: Option<&str>) -> Vec<FieldOption> {
    let Some(settings) = settings else {
        return Vec::new();
    };

    match serde_json::from_str::<LegacySettings>(settings) {
        Ok(parsed) => parsed.options,
        Err(e) => {
            warn!(field, error = %e, "Unreadable field settings, treating as no options");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(json: &str) -> Option<ProjectFields> {
        typed_fields(serde_json::from_str(json).unwrap())
    }

    fn legacy(json: &str) -> Option<ProjectFields> {
        legacy_fields(serde_json::from_str(json).unwrap())
    }

    const TYPED: &str = r#"{
        "node": {
            "__typename": "ProjectV2",
            "fields": {
                "nodes": [
                    { "__typename": "ProjectV2Field", "id": "F_title", "name": "Title", "dataType": "TITLE" },
                    { "__typename": "ProjectV2Field", "id": "F_notes", "name": "Notes", "dataType": "TEXT" },
                    {
                        "__typename": "ProjectV2SingleSelectField",
                        "id": "F_status",
                        "name": "Status",
                        "dataType": "SINGLE_SELECT",
                        "options": [
                            { "id": "O_todo", "name": "Todo" },
                            { "id": "O_prog", "name": "In Progress" },
                            { "id": "O_done", "name": "Done" }
                        ]
                    },
                    { "__typename": "ProjectV2IterationField", "id": "F_iter", "name": "Sprint", "dataType": "ITERATION" },
                    null
                ]
            }
        }
    }"#;

    #[test]
    fn test_typed_fields() {
        let fields = typed(TYPED).unwrap();
        assert_eq!(fields.surface, ProjectSurface::Typed);
        assert_eq!(fields.fields.len(), 4);
        assert_eq!(fields.fields[0].kind, FieldKind::Other("title".to_string()));
        assert_eq!(fields.fields[1].kind, FieldKind::Text);
        assert_eq!(fields.fields[2].kind, FieldKind::SingleSelect);
        assert_eq!(fields.fields[2].options.len(), 3);
        assert_eq!(fields.fields[3].kind, FieldKind::Iteration);
    }

    #[test]
    fn test_typed_kind_from_typename() {
        let json = r#"{ "node": { "__typename": "ProjectV2", "fields": { "nodes": [
            { "__typename": "ProjectV2SingleSelectField", "id": "F", "name": "Status", "options": [] }
        ] } } }"#;
        let fields = typed(json).unwrap();
        assert_eq!(fields.fields[0].kind, FieldKind::SingleSelect);
    }

    #[test]
    fn test_non_project_node() {
        assert!(typed(r#"{ "node": { "__typename": "Issue" } }"#).is_none());
        assert!(typed(r#"{ "node": null }"#).is_none());
    }

    #[test]
    fn test_status_lookup_case_insensitive() {
        let fields = typed(TYPED).unwrap();
        let status = StatusField::find(&fields, "status").unwrap();

        assert_eq!(status.field_id, "F_status");
        assert_eq!(status.option_id("in progress"), Some("O_prog"));
        assert_eq!(status.option_id("IN PROGRESS"), Some("O_prog"));
        assert_eq!(status.option_id(" Done "), Some("O_done"));
        assert_eq!(status.option_id("Blocked"), None);
        assert_eq!(status.option_names(), vec!["Todo", "In Progress", "Done"]);
    }

    #[test]
    fn test_status_must_be_single_select() {
        let fields = ProjectFields {
            surface: ProjectSurface::Typed,
            fields: vec![ProjectField {
                id: "F".to_string(),
                name: "Status".to_string(),
                kind: FieldKind::Text,
                options: vec![],
            }],
        };
        assert!(StatusField::find(&fields, "status").is_none());
    }

    #[test]
    fn test_duplicate_option_names_last_wins() {
        let fields = ProjectFields {
            surface: ProjectSurface::Typed,
            fields: vec![ProjectField {
                id: "F".to_string(),
                name: "STATUS".to_string(),
                kind: FieldKind::SingleSelect,
                options: vec![
                    FieldOption {
                        id: "first".to_string(),
                        name: "Done".to_string(),
                    },
                    FieldOption {
                        id: "second".to_string(),
                        name: "done".to_string(),
                    },
                ],
            }],
        };
        let status = StatusField::find(&fields, "Status").unwrap();
        assert_eq!(status.option_id("Done"), Some("second"));
    }

    #[test]
    fn test_non_ascii_field_name_matches_like_options() {
        let fields = ProjectFields {
            surface: ProjectSurface::Typed,
            fields: vec![ProjectField {
                id: "F_etat".to_string(),
                name: "ÉTAT".to_string(),
                kind: FieldKind::SingleSelect,
                options: vec![FieldOption {
                    id: "O_fini".to_string(),
                    name: "Terminé".to_string(),
                }],
            }],
        };

        let status = StatusField::find(&fields, " état ").unwrap();
        assert_eq!(status.field_id, "F_etat");
        assert_eq!(status.option_id("TERMINÉ"), Some("O_fini"));
    }

    #[test]
    fn test_custom_status_field_name() {
        let fields = typed(TYPED).unwrap();
        assert!(StatusField::find(&fields, "Stage").is_none());
        assert!(StatusField::find(&fields, "STATUS").is_some());
    }

    #[test]
    fn test_legacy_fields_from_settings() {
        let json = r#"{ "node": { "__typename": "ProjectNext", "fields": { "nodes": [
            { "id": "L_title", "name": "Title", "dataType": "TITLE", "settings": "null" },
            {
                "id": "L_status",
                "name": "Status",
                "dataType": "SINGLE_SELECT",
                "settings": "{\"width\":200,\"options\":[{\"id\":\"f75ad846\",\"name\":\"Todo\",\"name_html\":\"Todo\"},{\"id\":\"47fc9ee4\",\"name\":\"In Progress\",\"name_html\":\"In Progress\"}]}"
            }
        ] } } }"#;

        let fields = legacy(json).unwrap();
        assert_eq!(fields.surface, ProjectSurface::Legacy);

        let status = StatusField::find(&fields, "status").unwrap();
        assert_eq!(status.surface, ProjectSurface::Legacy);
        assert_eq!(status.option_id("in progress"), Some("47fc9ee4"));
    }

    #[test]
    fn test_legacy_bad_settings_means_no_options() {
        let json = r#"{ "node": { "__typename": "ProjectNext", "fields": { "nodes": [
            { "id": "L_status", "name": "Status", "dataType": "SINGLE_SELECT", "settings": "{oops" }
        ] } } }"#;

        let fields = legacy(json).unwrap();
        assert!(fields.fields[0].options.is_empty());
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::SingleSelect.to_string(), "single-select");
        assert_eq!(FieldKind::from_data_type("LABELS").to_string(), "labels");
    }
}
