//! Learning-plan task file
//!
//! The input document looks like:
//!
//! ```json
//! {
//!   "items": [
//!     { "title": "Learn X", "body": "Read the book", "status": "In Progress" },
//!     { "title": "Learn Y", "description": "Alternative body key" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// A single task to import as an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Issue title
    pub title: String,

    /// Issue body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Alternative key for the issue body, used when `body` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Status option name to set on the project item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Task {
    /// Create a task with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            description: None,
            status: None,
        }
    }

    /// Set the status label
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Issue body text: `body`, else `description`, else empty
    pub fn body_text(&self) -> &str {
        self.body
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }

    /// Requested status, if any non-blank one was given
    pub fn requested_status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The parsed input document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Tasks in import order
    pub items: Vec<Task>,
}

impl TaskList {
    /// Load and validate a task file
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading task file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate a task document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let list: TaskList = serde_json::from_str(json)?;
        list.validate()?;
        Ok(list)
    }

    /// Check every task, failing on the first invalid one
    pub fn validate(&self) -> Result<()> {
        for (index, task) in self.items.iter().enumerate() {
            if task.title.trim().is_empty() {
                return Err(Error::InvalidTask {
                    index,
                    reason: "title must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the document has no tasks
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate tasks in import order
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_items_in_order() {
        let json = r#"{
            "items": [
                { "title": "Learn X", "body": "Read chapter 1", "status": "In Progress" },
                { "title": "Learn Y" }
            ]
        }"#;

        let list = TaskList::from_json(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.items[0].title, "Learn X");
        assert_eq!(list.items[0].status.as_deref(), Some("In Progress"));
        assert_eq!(list.items[1].title, "Learn Y");
        assert!(list.items[1].status.is_none());
    }

    #[test]
    fn test_body_falls_back_to_description() {
        let json = r#"{ "items": [ { "title": "A", "description": "from description" } ] }"#;
        let list = TaskList::from_json(json).unwrap();
        assert_eq!(list.items[0].body_text(), "from description");
    }

    #[test]
    fn test_body_wins_over_description() {
        let task = Task {
            title: "A".to_string(),
            body: Some("body".to_string()),
            description: Some("description".to_string()),
            status: None,
        };
        assert_eq!(task.body_text(), "body");
    }

    #[test]
    fn test_missing_body_is_empty() {
        assert_eq!(Task::new("A").body_text(), "");
    }

    #[test]
    fn test_blank_status_is_not_requested() {
        assert_eq!(Task::new("A").with_status("   ").requested_status(), None);
        assert_eq!(
            Task::new("A").with_status(" Done ").requested_status(),
            Some("Done")
        );
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let json = r#"{ "items": [ { "body": "no title" } ] }"#;
        let err = TaskList::from_json(json).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_blank_title_reports_index() {
        let json = r#"{ "items": [ { "title": "ok" }, { "title": "  " } ] }"#;
        let err = TaskList::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidTask { index: 1, .. }));
    }

    #[test]
    fn test_missing_items_is_rejected() {
        assert!(TaskList::from_json(r#"{ "tasks": [] }"#).is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let json = r#"{ "version": 2, "items": [ { "title": "A", "week": 3 } ] }"#;
        let list = TaskList::from_json(json).unwrap();
        assert_eq!(list.items[0], Task::new("A"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "items": [ {{ "title": "From disk" }} ] }}"#).unwrap();

        let list = TaskList::load(file.path()).unwrap();
        assert_eq!(list.items[0].title, "From disk");
    }

    #[test]
    fn test_load_missing_file() {
        let err = TaskList::load(Path::new("/nonexistent/learning-plan.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
