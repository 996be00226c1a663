pub mod graphql;
pub mod item;

pub use graphql::{GraphQLError, GraphQLResponse, Page, PageInfo, RepositoryData, RepositoryItems};
pub use item::{
    ChangedFile, FileConnection, Issue, ItemKind, Label, LabelConnection, LabelPageInfo,
    LabeledItem, PullRequest, Viewer,
};
