use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

/// One fetched batch of a paginated collection.
///
/// The end cursor is only meaningful for the query it came from; feeding it
/// into a query with different parameters is undefined.
#[derive(Debug, Deserialize, Clone)]
pub struct Page<T> {
    pub nodes: Vec<T>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

// Wire shape of the items query: repository is null when the org/repo pair
// does not resolve.
#[derive(Debug, Deserialize)]
pub struct RepositoryData<T> {
    pub repository: Option<RepositoryItems<T>>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryItems<T> {
    pub items: Page<T>,
}

// Viewer data structures
#[derive(Debug, Deserialize)]
pub struct ViewerData {
    pub viewer: super::Viewer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Issue;

    #[test]
    fn test_page_deserializes_from_wire_shape() {
        let json = r#"{
            "repository": {
                "items": {
                    "nodes": [{
                        "number": 101,
                        "title": "GC pause regression",
                        "bodyText": "details",
                        "labels": { "nodes": [{"name": "area-gc"}], "pageInfo": {"hasNextPage": false} }
                    }],
                    "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29yOjEwMA==" },
                    "totalCount": 2310
                }
            }
        }"#;

        let data: RepositoryData<Issue> = serde_json::from_str(json).unwrap();
        let page = data.repository.unwrap().items;
        assert_eq!(page.nodes.len(), 1);
        assert_eq!(page.nodes[0].number, 101);
        assert!(page.page_info.has_next_page);
        assert_eq!(page.page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjEwMA=="));
        assert_eq!(page.total_count, 2310);
    }

    #[test]
    fn test_missing_repository_is_null() {
        let json = r#"{ "repository": null }"#;
        let data: RepositoryData<Issue> = serde_json::from_str(json).unwrap();
        assert!(data.repository.is_none());
    }

    #[test]
    fn test_last_page_has_null_cursor() {
        let json = r#"{
            "nodes": [],
            "pageInfo": { "hasNextPage": false, "endCursor": null },
            "totalCount": 0
        }"#;
        let page: Page<Issue> = serde_json::from_str(json).unwrap();
        assert!(!page.page_info.has_next_page);
        assert!(page.page_info.end_cursor.is_none());
    }
}
