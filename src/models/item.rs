use serde::{Deserialize, Serialize};

/// Which item collection a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Issues,
    PullRequests,
}

impl ItemKind {
    /// The GraphQL field name under `repository`.
    pub fn query_field(&self) -> &'static str {
        match self {
            ItemKind::Issues => "issues",
            ItemKind::PullRequests => "pullRequests",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_field())
    }
}

/// Shared shape of the records the engine pages over. Pull requests extend
/// the base shape with changed file paths rather than inheriting from it.
pub trait LabeledItem: for<'de> Deserialize<'de> {
    const KIND: ItemKind;

    fn number(&self) -> u64;
    fn title(&self) -> &str;
    fn label_names(&self) -> Vec<&str>;
    /// True when the item has more labels than were fetched.
    fn labels_truncated(&self) -> bool;
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(rename = "bodyText", default)]
    pub body_text: String,
    pub labels: LabelConnection,
}

impl LabeledItem for Issue {
    const KIND: ItemKind = ItemKind::Issues;

    fn number(&self) -> u64 {
        self.number
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn label_names(&self) -> Vec<&str> {
        self.labels.nodes.iter().map(|l| l.name.as_str()).collect()
    }

    fn labels_truncated(&self) -> bool {
        self.labels.page_info.has_next_page
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(rename = "bodyText", default)]
    pub body_text: String,
    pub labels: LabelConnection,
    #[serde(default)]
    pub files: Option<FileConnection>,
}

impl PullRequest {
    pub fn changed_paths(&self) -> Vec<&str> {
        self.files
            .as_ref()
            .map(|f| f.nodes.iter().map(|n| n.path.as_str()).collect())
            .unwrap_or_default()
    }
}

impl LabeledItem for PullRequest {
    const KIND: ItemKind = ItemKind::PullRequests;

    fn number(&self) -> u64 {
        self.number
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn label_names(&self) -> Vec<&str> {
        self.labels.nodes.iter().map(|l| l.name.as_str()).collect()
    }

    fn labels_truncated(&self) -> bool {
        self.labels.page_info.has_next_page
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LabelConnection {
    pub nodes: Vec<Label>,
    #[serde(rename = "pageInfo")]
    pub page_info: LabelPageInfo,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LabelPageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FileConnection {
    pub nodes: Vec<ChangedFile>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChangedFile {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Viewer {
    pub login: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_with_labels(names: &[&str], truncated: bool) -> Issue {
        Issue {
            number: 42,
            title: "test".to_string(),
            body_text: String::new(),
            labels: LabelConnection {
                nodes: names
                    .iter()
                    .map(|n| Label {
                        name: n.to_string(),
                    })
                    .collect(),
                page_info: LabelPageInfo {
                    has_next_page: truncated,
                },
            },
        }
    }

    #[test]
    fn test_label_names_and_truncation() {
        let issue = issue_with_labels(&["area-gc", "bug"], false);
        assert_eq!(issue.label_names(), vec!["area-gc", "bug"]);
        assert!(!issue.labels_truncated());

        let issue = issue_with_labels(&["area-gc"], true);
        assert!(issue.labels_truncated());
    }

    #[test]
    fn test_pull_request_changed_paths() {
        let json = r#"{
            "number": 7,
            "title": "Fix codegen",
            "bodyText": "body",
            "labels": { "nodes": [{"name": "area-codegen"}], "pageInfo": {"hasNextPage": false} },
            "files": { "nodes": [{"path": "src/jit.rs"}, {"path": "src/lib.rs"}] }
        }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pr.changed_paths(), vec!["src/jit.rs", "src/lib.rs"]);
        assert_eq!(PullRequest::KIND.query_field(), "pullRequests");
    }

    #[test]
    fn test_issue_missing_body_defaults_empty() {
        let json = r#"{
            "number": 1,
            "title": "t",
            "labels": { "nodes": [], "pageInfo": {"hasNextPage": false} }
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.body_text.is_empty());
    }
}
