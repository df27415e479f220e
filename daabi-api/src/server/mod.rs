use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use daabi_common::model::user::MissingEmailError;
use daabi_db::{
    StoreError,
    client::{DbClient, DbError},
    feed::Feed,
    issues::IssueBoard,
};
use extract::Json;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::error;

mod extract;
mod routes;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub db_client: Arc<DbClient>,
    pub feed: Arc<Mutex<Feed>>,
    pub issues: Arc<Mutex<IssueBoard>>,
}

impl ServerState {
    #[must_use]
    pub fn new(db_client: DbClient, feed: Feed, issues: IssueBoard) -> Self {
        Self {
            db_client: Arc::new(db_client),
            feed: Arc::new(Mutex::new(feed)),
            issues: Arc::new(Mutex::new(issues)),
        }
    }
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub fn app(state: ServerState) -> Router {
    routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    MissingEmail(#[from] MissingEmailError),
    #[error("Fetching users failed: {0}")]
    FetchUsers(DbError),
    #[error("Creating user failed: {0}")]
    CreateUser(DbError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::Store(
                StoreError::PostNotFound(_)
                | StoreError::IssueNotFound(_)
                | StoreError::ContributionNotFound { .. },
            ) => StatusCode::NOT_FOUND,
            ServerError::Store(StoreError::WrongPostKind(_)) => StatusCode::CONFLICT,
            ServerError::QueryRejection(_)
            | ServerError::JsonRejection(_)
            | ServerError::Store(StoreError::Validation(_))
            | ServerError::MissingEmail(_) => StatusCode::BAD_REQUEST,
            ServerError::JsonResponse(_)
            | ServerError::FetchUsers(_)
            | ServerError::CreateUser(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, user facing summary. Details go into the `error` field.
    fn message(&self) -> &'static str {
        match self {
            ServerError::UnknownRoute(_) => "Unknown route",
            ServerError::PathRejection(_)
            | ServerError::QueryRejection(_)
            | ServerError::JsonRejection(_) => "Malformed request",
            ServerError::JsonResponse(_) => "Response could not be built",
            ServerError::Store(StoreError::PostNotFound(_)) => "Post not found",
            ServerError::Store(StoreError::IssueNotFound(_)) => "Issue not found",
            ServerError::Store(StoreError::ContributionNotFound { .. }) => {
                "Contribution not found"
            }
            ServerError::Store(StoreError::WrongPostKind(_)) => {
                "This action is not available for this post"
            }
            ServerError::Store(StoreError::Validation(_)) => "Invalid input",
            ServerError::MissingEmail(_) => "Email is required",
            ServerError::FetchUsers(_) => "Database connection failed",
            ServerError::CreateUser(_) => "Failed to create user",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
struct ErrorResponse {
    success: bool,
    status: u16,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let error_response = ErrorResponse {
            success: false,
            status: status.as_u16(),
            message: self.message(),
            error: match self {
                ServerError::MissingEmail(_) => None,
                ServerError::FetchUsers(err) | ServerError::CreateUser(err) => {
                    Some(err.to_string())
                }
                other => Some(other.to_string()),
            },
        };
        Json(error_response).with_status(status)
    }
}
