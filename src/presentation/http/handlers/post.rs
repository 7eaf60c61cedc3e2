//! Post Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreatePostRequest, SetCommentsAllowedRequest};
use crate::application::services::CreatePostInput;
use crate::domain::Post;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Create a new post
pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    body.validate().map_err(validation_error)?;

    let post = state
        .post_service
        .create_post(CreatePostInput {
            id: body.id,
            title: body.title,
            content: body.content,
            author: body.author,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Get a post with its comment tree
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = state.post_service.get_post(&post_id).await?;
    Ok(Json(post))
}

/// List all posts, newest first, each with its comment tree
pub async fn get_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.post_service.get_post_list().await?;
    Ok(Json(posts))
}

/// Enable or disable commenting on a post
pub async fn set_comments_allowed(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<SetCommentsAllowedRequest>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .post_service
        .set_comments_allowed(&post_id, body.allowed)
        .await?;
    Ok(Json(post))
}
