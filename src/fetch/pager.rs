use std::future::Future;

use futures::stream::{self, Stream, TryStreamExt};

use crate::client::GitHubClient;
use crate::constants::PAGE_SIZE;
use crate::error::GitHubResult;
use crate::fetch::filter::{self, Inclusion};
use crate::fetch::retry::{RetryOutcome, RetryPolicy};
use crate::models::{Issue, ItemKind, LabeledItem, Page, PullRequest};

/// Pagination state for one invocation. Initialized at loop start, mutated
/// once per successful page, discarded when the stream ends.
#[derive(Debug)]
struct FetchState {
    page: usize,
    cursor: Option<String>,
    has_next: bool,
    loaded: usize,
    total: Option<u64>,
}

impl FetchState {
    fn new() -> Self {
        Self {
            page: 1,
            cursor: None,
            has_next: true,
            loaded: 0,
            total: None,
        }
    }
}

struct Driver<F, P> {
    fetch: F,
    predicate: P,
    policy: RetryPolicy,
    kind: ItemKind,
    slug: String,
    page_limit: usize,
    state: FetchState,
}

/// Drive the page loop over an arbitrary page-fetching operation, yielding a
/// lazy, single-pass stream of (item, matched label) pairs.
///
/// `fetch` performs one page request for the given cursor; the retry policy
/// wraps each call. The stream is forward-only and not restartable: a new
/// invocation re-fetches from the beginning. Termination is always clean
/// (end of data, page ceiling, stalled cursor, or retry exhaustion) except
/// for fatal transport errors, which surface as an `Err` item.
pub fn paginate<T, F, Fut, P>(
    slug: String,
    fetch: F,
    predicate: P,
    page_limit: usize,
    policy: RetryPolicy,
) -> impl Stream<Item = GitHubResult<(T, String)>>
where
    T: LabeledItem,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = GitHubResult<Page<T>>>,
    P: Fn(&str) -> bool,
{
    let driver = Driver {
        fetch,
        predicate,
        policy,
        kind: T::KIND,
        slug,
        page_limit,
        state: FetchState::new(),
    };

    stream::try_unfold(driver, |mut d| async move {
        // The limit page itself is excluded: a limit of 2 fetches one page.
        if !d.state.has_next || d.state.page >= d.page_limit {
            return Ok::<_, crate::error::GitHubError>(None);
        }

        let cursor = d.state.cursor.clone();
        let kind = d.kind;
        let page_no = d.state.page;
        let limit = d.page_limit;
        let max_attempts = d.policy.max_attempts();
        let fetch = &mut d.fetch;

        let outcome = d
            .policy
            .run(|attempt| {
                if attempt == 0 {
                    eprintln!("Downloading {} page {}... (limit: {})", kind, page_no, limit);
                } else {
                    eprintln!(
                        "Downloading {} page {}... (limit: {}) (retry: {} of {})",
                        kind, page_no, limit, attempt, max_attempts
                    );
                }
                fetch(cursor.clone())
            })
            .await?;

        let page = match outcome {
            RetryOutcome::Success(page) => page,
            // Merged exit: exhaustion ends the stream exactly like the
            // natural end of data; pages already yielded stand.
            RetryOutcome::Exhausted => return Ok(None),
        };

        // A cursor that never advances would loop forever even though the
        // server keeps reporting hasNextPage.
        if d.state.cursor == page.page_info.end_cursor {
            eprintln!(
                "Paging did not progress. Cursor: '{}'. Stopping.",
                d.state.cursor.as_deref().unwrap_or("")
            );
            return Ok(None);
        }

        d.state.page += 1;
        d.state.cursor = page.page_info.end_cursor.clone();
        d.state.has_next = page.page_info.has_next_page;
        d.state.loaded += page.nodes.len();
        if d.state.total.is_none() {
            d.state.total = Some(page.total_count);
        }

        let mut batch = Vec::new();
        for item in page.nodes {
            match filter::evaluate(&item, &d.predicate) {
                Inclusion::Accepted(label) => {
                    eprintln!(
                        "{} {}#{} - Included in output. Applicable label: '{}'.",
                        d.kind,
                        d.slug,
                        item.number(),
                        label
                    );
                    batch.push((item, label));
                }
                Inclusion::LabelsTruncated => {
                    eprintln!(
                        "{} {}#{} - Excluded from output. Not all labels were loaded.",
                        d.kind,
                        d.slug,
                        item.number()
                    );
                }
                Inclusion::NotExactlyOne(count) => {
                    eprintln!(
                        "{} {}#{} - Excluded from output. {} applicable labels found.",
                        d.kind,
                        d.slug,
                        item.number(),
                        count
                    );
                }
            }
        }

        eprintln!(
            "Total {} downloaded: {} of {}. Cursor: '{}'. {}",
            d.kind,
            d.state.loaded,
            d.state.total.unwrap_or(0),
            d.state.cursor.as_deref().unwrap_or(""),
            if d.state.has_next {
                "Continuing to next page..."
            } else {
                "No more pages."
            }
        );

        Ok(Some((batch, d)))
    })
    .map_ok(|batch| stream::iter(batch.into_iter().map(Ok::<_, crate::error::GitHubError>)))
    .try_flatten()
}

/// Stream issues of `org/repo` carrying exactly one predicate-matching
/// label, newest first.
pub fn fetch_issues<P>(
    client: GitHubClient,
    org: &str,
    repo: &str,
    predicate: P,
    page_limit: usize,
    retry_schedule: Vec<u64>,
) -> impl Stream<Item = GitHubResult<(Issue, String)>>
where
    P: Fn(&str) -> bool,
{
    fetch_items::<Issue, P>(client, org, repo, predicate, page_limit, retry_schedule)
}

/// Stream pull requests of `org/repo` carrying exactly one
/// predicate-matching label, newest first.
pub fn fetch_pull_requests<P>(
    client: GitHubClient,
    org: &str,
    repo: &str,
    predicate: P,
    page_limit: usize,
    retry_schedule: Vec<u64>,
) -> impl Stream<Item = GitHubResult<(PullRequest, String)>>
where
    P: Fn(&str) -> bool,
{
    fetch_items::<PullRequest, P>(client, org, repo, predicate, page_limit, retry_schedule)
}

fn fetch_items<T, P>(
    client: GitHubClient,
    org: &str,
    repo: &str,
    predicate: P,
    page_limit: usize,
    retry_schedule: Vec<u64>,
) -> impl Stream<Item = GitHubResult<(T, String)>>
where
    T: LabeledItem,
    P: Fn(&str) -> bool,
{
    let slug = format!("{}/{}", org, repo);
    let org = org.to_string();
    let repo = repo.to_string();

    let fetch = move |cursor: Option<String>| {
        let client = client.clone();
        let org = org.clone();
        let repo = repo.clone();
        async move {
            client
                .items_page::<T>(&org, &repo, cursor.as_deref(), PAGE_SIZE)
                .await
        }
    };

    paginate(slug, fetch, predicate, page_limit, RetryPolicy::new(retry_schedule))
}
