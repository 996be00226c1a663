use serde_json::{json, Value};

use crate::constants::{ITEM_FIELDS, PAGE_INFO_FIELDS, PULL_REQUEST_FILES_FIELD};
use crate::models::ItemKind;

/// Build the query document for one page of a repository's item collection.
///
/// The field set is fixed: callers cannot select fields. Pull requests
/// additionally carry their changed file paths. Malformed org/repo values are
/// not validated here; they surface as a null `repository` in the response.
pub fn items_query(kind: ItemKind, page_size: u32) -> String {
    let extra_fields = match kind {
        ItemKind::Issues => "",
        ItemKind::PullRequests => PULL_REQUEST_FILES_FIELD,
    };

    format!(
        r#"
        query Items($owner: String!, $repo: String!, $after: String) {{
            repository(owner: $owner, name: $repo) {{
                items: {kind} (after: $after, first: {page_size}, orderBy: {{field: CREATED_AT, direction: DESC}}) {{
                    nodes {{
                        {ITEM_FIELDS}
                        {extra_fields}
                    }}
                    {PAGE_INFO_FIELDS}
                }}
            }}
        }}
        "#,
        kind = kind.query_field(),
    )
}

pub fn items_variables(org: &str, repo: &str, after: Option<&str>) -> Value {
    json!({
        "owner": org,
        "repo": repo,
        "after": after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_query_selects_fixed_fields() {
        let query = items_query(ItemKind::Issues, 100);
        assert!(query.contains("items: issues (after: $after, first: 100"));
        assert!(query.contains("number"));
        assert!(query.contains("bodyText"));
        assert!(query.contains("labels(first: 25)"));
        assert!(query.contains("endCursor"));
        assert!(query.contains("totalCount"));
        assert!(!query.contains("files(first: 100)"));
    }

    #[test]
    fn test_pull_request_query_adds_files() {
        let query = items_query(ItemKind::PullRequests, 50);
        assert!(query.contains("items: pullRequests (after: $after, first: 50"));
        assert!(query.contains("files(first: 100)"));
    }

    #[test]
    fn test_ordering_is_newest_first() {
        let query = items_query(ItemKind::Issues, 100);
        assert!(query.contains("orderBy: {field: CREATED_AT, direction: DESC}"));
    }

    #[test]
    fn test_variables_carry_cursor() {
        let vars = items_variables("dotnet", "runtime", Some("abc"));
        assert_eq!(vars["owner"], "dotnet");
        assert_eq!(vars["repo"], "runtime");
        assert_eq!(vars["after"], "abc");

        let vars = items_variables("dotnet", "runtime", None);
        assert!(vars["after"].is_null());
    }
}
