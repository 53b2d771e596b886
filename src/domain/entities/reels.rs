//! Reels / Reels_comments / reel_likes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reel {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub likes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelComment {
    pub id: String,
    pub reel_id: String,
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ReelComment {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// 좋아요 토글 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub liked: bool,
    pub likes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reel_defaults_missing_counters() {
        let reel: Reel = serde_json::from_value(serde_json::json!({ "id": "r-1" })).unwrap();
        assert_eq!(reel.comment_count, 0);
        assert_eq!(reel.likes, 0);
    }
}
