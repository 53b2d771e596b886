//! 릴스 댓글/좋아요 핸들러
//!
//! `/api/queries/reel-comments`는 한 경로에서 GET/POST/PUT/DELETE를 모두 받습니다.

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{CommentIdQuery, CreateCommentRequest, ReelIdQuery, ToggleLikeRequest, UpdateCommentRequest};
use crate::services::reels::ReelService;
use crate::utils::string_utils::require_param;

pub async fn list_comments(query: web::Query<ReelIdQuery>) -> AppResult<HttpResponse> {
    let reel_id = require_param(&query.reel_id, "reel_id")?;

    let comments = ReelService::instance().comments(reel_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "comments": comments })))
}

pub async fn create_comment(user: AuthenticatedUser, payload: web::Json<CreateCommentRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let comment = ReelService::instance().add_comment(&user.user_id, &payload).await?;
    Ok(HttpResponse::Created().json(json!({ "comment": comment })))
}

pub async fn update_comment(user: AuthenticatedUser, payload: web::Json<UpdateCommentRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let comment = ReelService::instance().edit_comment(&user.user_id, &payload).await?;
    Ok(HttpResponse::Ok().json(json!({ "comment": comment })))
}

pub async fn delete_comment(user: AuthenticatedUser, query: web::Query<CommentIdQuery>) -> AppResult<HttpResponse> {
    let comment_id = require_param(&query.comment_id, "comment_id")?;

    let remaining = ReelService::instance().delete_comment(&user, comment_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": comment_id, "comment_count": remaining })))
}

/// `POST /api/queries/reel-likes`
pub async fn toggle_like(user: AuthenticatedUser, payload: web::Json<ToggleLikeRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let state = ReelService::instance().toggle_like(&user.user_id, &payload.reel_id).await?;
    Ok(HttpResponse::Ok().json(state))
}
