pub mod client;
pub mod feed;
pub mod issues;
mod record;
pub mod seed;

use daabi_common::model::{
    Id, ModelValidationError,
    issue::{ContributionMarker, IssueMarker},
    post::{PostMarker, WrongPostKindError},
};
use thiserror::Error;

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;

/// Failures of the in-memory feed and issue board.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum StoreError {
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error("Issue with id {0} was not found.")]
    IssueNotFound(Id<IssueMarker>),
    #[error("Contribution with id {contribution} was not found on issue {issue}.")]
    ContributionNotFound {
        issue: Id<IssueMarker>,
        contribution: Id<ContributionMarker>,
    },
    #[error(transparent)]
    WrongPostKind(#[from] WrongPostKindError),
    #[error(transparent)]
    Validation(#[from] ModelValidationError),
}
