//! Comment Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::CreateCommentRequest;
use crate::application::services::CreateCommentInput;
use crate::domain::Comment;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Create a comment on a post
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    body.validate().map_err(validation_error)?;

    let comment = state
        .comment_service
        .create_comment(CreateCommentInput {
            id: body.id,
            post_id,
            parent_id: body.parent_id,
            author: body.author,
            text: body.text,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Get a post's comments as a flat, creation-ordered list
pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state.comment_service.get_comments(&post_id).await?;
    Ok(Json(comments))
}
