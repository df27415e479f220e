use crate::server::{Result, ServerError, ServerRouter, extract::Json};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use daabi_common::model::user::{CreateUser, NewUser, User};
use daabi_db::client::DbClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_users)
        .typed_post(create_user)
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
struct UsersResponse {
    success: bool,
    message: &'static str,
    users: Vec<User>,
    user_count: usize,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
struct UserCreatedResponse {
    success: bool,
    message: &'static str,
    user: User,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/users", rejection(ServerError))]
struct UsersPath();

async fn list_users(
    UsersPath(): UsersPath,
    State(db): State<Arc<DbClient>>,
) -> Result<Json<UsersResponse>> {
    let users = db.fetch_users().await.map_err(ServerError::FetchUsers)?;

    Ok(Json(UsersResponse {
        success: true,
        message: "Database connection successful",
        user_count: users.len(),
        users,
    }))
}

async fn create_user(
    UsersPath(): UsersPath,
    State(db): State<Arc<DbClient>>,
    Json(user): Json<CreateUser>,
) -> Result<Json<UserCreatedResponse>> {
    let user = NewUser::try_from(user)?;
    let user = db
        .create_user(&user)
        .await
        .map_err(ServerError::CreateUser)?;

    Ok(Json(UserCreatedResponse {
        success: true,
        message: "User created successfully",
        user,
    }))
}

#[cfg(test)]
mod tests {
    use crate::server::test_util::{send, state};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn user_without_email_is_rejected() {
        let state = state();

        for body in [
            json!({ "name": "Rahim" }),
            json!({ "name": "Rahim", "email": " " }),
        ] {
            let (status, body) = send(&state, Method::POST, "/users", Some(body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body,
                json!({ "success": false, "status": 400, "message": "Email is required" })
            );
        }
    }

    #[tokio::test]
    async fn unreachable_database_is_reported() {
        let state = state();

        let (status, body) = send(&state, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["status"], json!(500));
        assert_eq!(body["message"], json!("Database connection failed"));
        assert!(body["error"].is_string());

        let (status, body) = send(
            &state,
            Method::POST,
            "/users",
            Some(json!({ "email": "rahim@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!("Failed to create user"));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn users_route_rejects_other_methods() {
        let state = state();

        let (status, _) = send(&state, Method::DELETE, "/users", None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
