pub const GITHUB_API_URL: &str = "https://api.github.com/graphql";
pub const CONFIG_FILE: &str = ".ghlabel-config.json";

/// Items requested per page.
pub const PAGE_SIZE: u32 = 100;
/// Default page ceiling for a fetch invocation.
pub const DEFAULT_PAGE_LIMIT: usize = 1000;
/// Default retry delay schedule, in seconds.
pub const DEFAULT_RETRY_SCHEDULE: [u64; 3] = [30, 30, 30];

// Common GraphQL field selections. Labels are capped at 25 per item; the
// pageInfo flag on the label connection marks items whose label set was cut
// off so the filter can exclude them.
pub const ITEM_FIELDS: &str = r#"
    number
    title
    bodyText
    labels(first: 25) {
        nodes { name }
        pageInfo { hasNextPage }
    }
"#;

pub const PULL_REQUEST_FILES_FIELD: &str = r#"
    files(first: 100) {
        nodes { path }
    }
"#;

pub const PAGE_INFO_FIELDS: &str = r#"
    pageInfo {
        hasNextPage
        endCursor
    }
    totalCount
"#;
