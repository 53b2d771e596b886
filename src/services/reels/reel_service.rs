//! 릴스 댓글과 좋아요

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{CreateCommentRequest, UpdateCommentRequest};
use crate::domain::entities::{LikeState, Reel, ReelComment};
use crate::repositories::ReelRepository;

/// 삭제는 작성자 또는 관리자
pub fn can_delete_comment(comment: &ReelComment, user: &AuthenticatedUser) -> bool {
    comment.is_authored_by(&user.user_id) || user.is_admin()
}

#[service(name = "reel")]
pub struct ReelService {
    reel_repo: Arc<ReelRepository>,
}

impl ReelService {
    pub async fn comments(&self, reel_id: &str) -> Result<Vec<ReelComment>, AppError> {
        self.existing_reel(reel_id).await?;
        self.reel_repo.list_comments(reel_id).await
    }

    pub async fn add_comment(&self, user_id: &str, request: &CreateCommentRequest) -> Result<ReelComment, AppError> {
        self.existing_reel(&request.reel_id).await?;
        self.reel_repo.insert_comment(&request.reel_id, user_id, request.text.trim()).await
    }

    /// 작성자만 수정할 수 있습니다.
    pub async fn edit_comment(&self, user_id: &str, request: &UpdateCommentRequest) -> Result<ReelComment, AppError> {
        let comment = self.existing_comment(&request.comment_id).await?;
        if !comment.is_authored_by(user_id) {
            return Err(AppError::AuthorizationError("본인 댓글만 수정할 수 있습니다".to_string()));
        }
        self.reel_repo.update_comment_text(&comment.id, request.text.trim()).await
    }

    /// 삭제 후 남은 댓글 수를 반환합니다.
    pub async fn delete_comment(&self, user: &AuthenticatedUser, comment_id: &str) -> Result<i64, AppError> {
        let comment = self.existing_comment(comment_id).await?;
        if !can_delete_comment(&comment, user) {
            return Err(AppError::AuthorizationError("댓글을 삭제할 권한이 없습니다".to_string()));
        }

        let remaining = self.reel_repo.delete_comment(&comment.id, &comment.reel_id).await?;
        log::debug!("댓글 삭제: {} (reel {}, 남은 댓글 {})", comment.id, comment.reel_id, remaining);
        Ok(remaining)
    }

    pub async fn toggle_like(&self, user_id: &str, reel_id: &str) -> Result<LikeState, AppError> {
        self.existing_reel(reel_id).await?;

        if self.reel_repo.has_liked(reel_id, user_id).await? {
            let likes = self.reel_repo.remove_like(reel_id, user_id).await?;
            Ok(LikeState { liked: false, likes })
        } else {
            let likes = self.reel_repo.add_like(reel_id, user_id).await?;
            Ok(LikeState { liked: true, likes })
        }
    }

    async fn existing_reel(&self, reel_id: &str) -> Result<Reel, AppError> {
        self.reel_repo
            .find_reel(reel_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("릴을 찾을 수 없습니다: {}", reel_id)))
    }

    async fn existing_comment(&self, comment_id: &str) -> Result<ReelComment, AppError> {
        self.reel_repo
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("댓글을 찾을 수 없습니다: {}", comment_id)))
    }
}
