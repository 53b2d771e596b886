//! 릴스 댓글/좋아요 DTO

use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct ReelIdQuery {
    pub reel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentIdQuery {
    pub comment_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "reel_id가 필요합니다"))]
    pub reel_id: String,

    #[validate(custom(function = "validate_comment_text"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "comment_id가 필요합니다"))]
    pub comment_id: String,

    #[validate(custom(function = "validate_comment_text"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ToggleLikeRequest {
    #[validate(length(min = 1, message = "reel_id가 필요합니다"))]
    pub reel_id: String,
}

/// 공백 제거 후 1-1000자
fn validate_comment_text(text: &str) -> Result<(), ValidationError> {
    let count = text.trim().chars().count();
    if count == 0 || count > MAX_COMMENT_CHARS {
        return Err(ValidationError::new("invalid_comment")
            .with_message("댓글은 1-1000자 사이여야 합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_text_bounds() {
        assert!(validate_comment_text("nice").is_ok());
        assert!(validate_comment_text("   ").is_err());
        assert!(validate_comment_text(&"a".repeat(1000)).is_ok());
        assert!(validate_comment_text(&"a".repeat(1001)).is_err());
        // 글자 수 기준
        assert!(validate_comment_text(&"가".repeat(1000)).is_ok());
    }
}
