use crate::server::{
    Result, ServerError, ServerRouter,
    extract::{Json, Query},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use daabi_common::model::{
    Id,
    issue::{
        ContributionMarker, CreateContribution, CreateIssue, Issue, IssueMarker, IssueSort,
        StatusFilter,
    },
    tally::Vote,
};
use daabi_db::{StoreError, issues::IssueBoard};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

type SharedIssues = Arc<Mutex<IssueBoard>>;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_issues)
        .typed_post(create_issue)
        .typed_get(get_issue)
        .typed_post(vote_on_issue)
        .typed_post(contribute_to_issue)
        .typed_post(vote_on_contribution)
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct ListIssuesQuery {
    status: StatusFilter,
    sort: IssueSort,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Deserialize, Serialize)]
struct VoteRequest {
    vote: Vote,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/issues", rejection(ServerError))]
struct ListIssuesPath();

async fn list_issues(
    ListIssuesPath(): ListIssuesPath,
    State(issues): State<SharedIssues>,
    Query(ListIssuesQuery { status, sort }): Query<ListIssuesQuery>,
) -> Json<Vec<Issue>> {
    let issues = issues.lock().await;

    Json(issues.list(status, sort).into_iter().cloned().collect())
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/issues/create", rejection(ServerError))]
struct CreateIssuePath();

async fn create_issue(
    CreateIssuePath(): CreateIssuePath,
    State(issues): State<SharedIssues>,
    Json(issue): Json<CreateIssue>,
) -> Result<Json<Issue>> {
    let issue = issues.lock().await.create_issue(issue)?.clone();

    Ok(Json(issue))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/issues/{id}", rejection(ServerError))]
struct GetIssuePath {
    id: Id<IssueMarker>,
}

async fn get_issue(
    GetIssuePath { id }: GetIssuePath,
    State(issues): State<SharedIssues>,
) -> Result<Json<Issue>> {
    let issue = issues
        .lock()
        .await
        .issue(id)
        .cloned()
        .ok_or(StoreError::IssueNotFound(id))?;

    Ok(Json(issue))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/issues/{id}/votes", rejection(ServerError))]
struct IssueVotesPath {
    id: Id<IssueMarker>,
}

async fn vote_on_issue(
    IssueVotesPath { id }: IssueVotesPath,
    State(issues): State<SharedIssues>,
    Json(VoteRequest { vote }): Json<VoteRequest>,
) -> Result<Json<Issue>> {
    let issue = issues.lock().await.vote(id, vote)?.clone();

    Ok(Json(issue))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/issues/{id}/contributions", rejection(ServerError))]
struct ContributionsPath {
    id: Id<IssueMarker>,
}

async fn contribute_to_issue(
    ContributionsPath { id }: ContributionsPath,
    State(issues): State<SharedIssues>,
    Json(contribution): Json<CreateContribution>,
) -> Result<Json<Issue>> {
    let issue = issues.lock().await.contribute(id, contribution)?.clone();

    Ok(Json(issue))
}

#[derive(TypedPath, Deserialize)]
#[typed_path(
    "/issues/{id}/contributions/{contribution_id}/votes",
    rejection(ServerError)
)]
struct ContributionVotesPath {
    id: Id<IssueMarker>,
    contribution_id: Id<ContributionMarker>,
}

async fn vote_on_contribution(
    ContributionVotesPath {
        id,
        contribution_id,
    }: ContributionVotesPath,
    State(issues): State<SharedIssues>,
    Json(VoteRequest { vote }): Json<VoteRequest>,
) -> Result<Json<Issue>> {
    let issue = issues
        .lock()
        .await
        .vote_contribution(id, contribution_id, vote)?
        .clone();

    Ok(Json(issue))
}
