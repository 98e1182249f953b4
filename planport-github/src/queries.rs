//! GraphQL documents sent to GitHub

/// Typed Projects v2 field configurations
pub const PROJECT_FIELDS: &str = r#"
    query($projectId: ID!, $first: Int!) {
        node(id: $projectId) {
            __typename
            ... on ProjectV2 {
                fields(first: $first) {
                    nodes {
                        __typename
                        ... on ProjectV2FieldCommon {
                            id
                            name
                            dataType
                        }
                        ... on ProjectV2SingleSelectField {
                            options {
                                id
                                name
                            }
                        }
                    }
                }
            }
        }
    }
"#;

/// Pre-v2 project fields, options encoded in `settings`
pub const LEGACY_PROJECT_FIELDS: &str = r#"
    query($projectId: ID!, $first: Int!) {
        node(id: $projectId) {
            __typename
            ... on ProjectNext {
                fields(first: $first) {
                    nodes {
                        id
                        name
                        dataType
                        settings
                    }
                }
            }
        }
    }
"#;

pub const CREATE_ISSUE: &str = r#"
    mutation($repositoryId: ID!, $title: String!, $body: String) {
        createIssue(input: { repositoryId: $repositoryId, title: $title, body: $body }) {
            issue {
                id
            }
        }
    }
"#;

pub const ADD_PROJECT_ITEM: &str = r#"
    mutation($projectId: ID!, $contentId: ID!) {
        addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
            item {
                id
            }
        }
    }
"#;

pub const LEGACY_ADD_PROJECT_ITEM: &str = r#"
    mutation($projectId: ID!, $contentId: ID!) {
        addProjectNextItem(input: { projectId: $projectId, contentId: $contentId }) {
            projectNextItem {
                id
            }
        }
    }
"#;

pub const SET_SINGLE_SELECT: &str = r#"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
        updateProjectV2ItemFieldValue(input: {
            projectId: $projectId,
            itemId: $itemId,
            fieldId: $fieldId,
            value: { singleSelectOptionId: $optionId }
        }) {
            projectV2Item {
                id
            }
        }
    }
"#;

pub const LEGACY_SET_FIELD: &str = r#"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
        updateProjectNextItemField(input: {
            projectId: $projectId,
            itemId: $itemId,
            fieldId: $fieldId,
            value: $optionId
        }) {
            projectNextItem {
                id
            }
        }
    }
"#;
