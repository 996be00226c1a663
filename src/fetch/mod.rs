pub mod filter;
pub mod pager;
pub mod retry;

pub use filter::{evaluate, Inclusion, LabelMatcher};
pub use pager::{fetch_issues, fetch_pull_requests, paginate};
pub use retry::{RetryOutcome, RetryPolicy};
