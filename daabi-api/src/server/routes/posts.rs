use crate::server::{Result, ServerError, ServerRouter, extract::Json};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use daabi_common::model::{
    Id,
    post::{CreateComment, CreatePost, Post, PostMarker},
    tally::{DemandVote, EventResponse, Reaction},
};
use daabi_db::{StoreError, feed::Feed};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

type SharedFeed = Arc<Mutex<Feed>>;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_post(create_post)
        .typed_get(get_post)
        .typed_post(react_to_post)
        .typed_post(vote_on_post)
        .typed_post(respond_to_post)
        .typed_post(comment_on_post)
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Deserialize, Serialize)]
struct ReactRequest {
    reaction: Reaction,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Deserialize, Serialize)]
struct VoteRequest {
    vote: DemandVote,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Deserialize, Serialize)]
struct RespondRequest {
    response: EventResponse,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct ListPostsPath();

async fn list_posts(
    ListPostsPath(): ListPostsPath,
    State(feed): State<SharedFeed>,
) -> Json<Vec<Post>> {
    Json(feed.lock().await.posts().to_vec())
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/create", rejection(ServerError))]
struct CreatePostPath();

async fn create_post(
    CreatePostPath(): CreatePostPath,
    State(feed): State<SharedFeed>,
    Json(post): Json<CreatePost>,
) -> Result<Json<Post>> {
    let post = feed.lock().await.create_post(&post)?.clone();

    Ok(Json(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct GetPostPath {
    id: Id<PostMarker>,
}

async fn get_post(
    GetPostPath { id }: GetPostPath,
    State(feed): State<SharedFeed>,
) -> Result<Json<Post>> {
    let post = feed
        .lock()
        .await
        .post(id)
        .cloned()
        .ok_or(StoreError::PostNotFound(id))?;

    Ok(Json(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/reactions", rejection(ServerError))]
struct ReactionsPath {
    id: Id<PostMarker>,
}

async fn react_to_post(
    ReactionsPath { id }: ReactionsPath,
    State(feed): State<SharedFeed>,
    Json(ReactRequest { reaction }): Json<ReactRequest>,
) -> Result<Json<Post>> {
    let post = feed.lock().await.react(id, reaction)?.clone();

    Ok(Json(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/votes", rejection(ServerError))]
struct VotesPath {
    id: Id<PostMarker>,
}

async fn vote_on_post(
    VotesPath { id }: VotesPath,
    State(feed): State<SharedFeed>,
    Json(VoteRequest { vote }): Json<VoteRequest>,
) -> Result<Json<Post>> {
    let post = feed.lock().await.vote(id, vote)?.clone();

    Ok(Json(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/responses", rejection(ServerError))]
struct ResponsesPath {
    id: Id<PostMarker>,
}

async fn respond_to_post(
    ResponsesPath { id }: ResponsesPath,
    State(feed): State<SharedFeed>,
    Json(RespondRequest { response }): Json<RespondRequest>,
) -> Result<Json<Post>> {
    let post = feed.lock().await.respond(id, response)?.clone();

    Ok(Json(post))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/comments", rejection(ServerError))]
struct CommentsPath {
    id: Id<PostMarker>,
}

async fn comment_on_post(
    CommentsPath { id }: CommentsPath,
    State(feed): State<SharedFeed>,
    Json(comment): Json<CreateComment>,
) -> Result<Json<Post>> {
    let post = feed.lock().await.comment(id, &comment.content)?.clone();

    Ok(Json(post))
}
