//! # 릴스 리포지토리
//!
//! `Reels`, `Reels_comments`, `reel_likes` 테이블을 다룹니다.
//! 카운터(`comment_count`, `likes`)는 항상 `_inc`로만 바꿉니다.
//! 감소는 행을 실제로 지운 경우에만 `{column: {_gt: 0}}` 조건을 붙여 보내므로
//! 읽고-쓰기 경합 없이 0 아래로 내려가지 않습니다.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::{Reel, ReelComment};
use crate::graphql::{HasuraClient, MutationResult};

const COMMENT_FIELDS: &str = "id reel_id user_id text created_at";

pub struct ReelRepository {
    client: Arc<HasuraClient>,
}

#[derive(Deserialize)]
struct ReelByPk {
    #[serde(rename = "Reels_by_pk")]
    reel: Option<Reel>,
}

impl ReelRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    pub async fn find_reel(&self, reel_id: &str) -> Result<Option<Reel>, AppError> {
        let data: ReelByPk = self.client
            .request(
                "query ReelById($id: uuid!) { Reels_by_pk(id: $id) { id user_id comment_count likes } }",
                json!({ "id": reel_id }),
            )
            .await?;
        Ok(data.reel)
    }

    /// 댓글 목록 (오래된 순)
    pub async fn list_comments(&self, reel_id: &str) -> Result<Vec<ReelComment>, AppError> {
        #[derive(Deserialize)]
        struct CommentsData {
            #[serde(rename = "Reels_comments")]
            comments: Vec<ReelComment>,
        }

        let query = format!(
            "query ReelComments($reel_id: uuid!) {{ \
             Reels_comments(where: {{reel_id: {{_eq: $reel_id}}}}, order_by: {{created_at: asc}}) {{ {} }} }}",
            COMMENT_FIELDS
        );
        let data: CommentsData = self.client.request(&query, json!({ "reel_id": reel_id })).await?;
        Ok(data.comments)
    }

    pub async fn find_comment(&self, comment_id: &str) -> Result<Option<ReelComment>, AppError> {
        #[derive(Deserialize)]
        struct CommentByPk {
            #[serde(rename = "Reels_comments_by_pk")]
            comment: Option<ReelComment>,
        }

        let query = format!(
            "query CommentById($id: uuid!) {{ Reels_comments_by_pk(id: $id) {{ {} }} }}",
            COMMENT_FIELDS
        );
        let data: CommentByPk = self.client.request(&query, json!({ "id": comment_id })).await?;
        Ok(data.comment)
    }

    /// 댓글 저장과 `comment_count` 증가를 한 뮤테이션으로 보냅니다.
    pub async fn insert_comment(&self, reel_id: &str, user_id: &str, text: &str) -> Result<ReelComment, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_Reels_comments_one")]
            comment: Option<ReelComment>,
            #[serde(rename = "update_Reels_by_pk")]
            _reel: Option<serde_json::Value>,
        }

        let query = format!(
            "mutation InsertComment($reel_id: uuid!, $user_id: uuid!, $text: String!) {{ \
             insert_Reels_comments_one(object: {{reel_id: $reel_id, user_id: $user_id, text: $text}}) {{ {} }} \
             update_Reels_by_pk(pk_columns: {{id: $reel_id}}, _inc: {{comment_count: 1}}) {{ id }} }}",
            COMMENT_FIELDS
        );

        let data: Inserted = self.client
            .request(&query, json!({ "reel_id": reel_id, "user_id": user_id, "text": text }))
            .await?;

        data.comment
            .ok_or_else(|| AppError::ExternalServiceError("insert_Reels_comments_one 결과가 비어 있습니다".to_string()))
    }

    pub async fn update_comment_text(&self, comment_id: &str, text: &str) -> Result<ReelComment, AppError> {
        #[derive(Deserialize)]
        struct Updated {
            #[serde(rename = "update_Reels_comments_by_pk")]
            comment: Option<ReelComment>,
        }

        let query = format!(
            "mutation UpdateComment($id: uuid!, $text: String!) {{ \
             update_Reels_comments_by_pk(pk_columns: {{id: $id}}, _set: {{text: $text}}) {{ {} }} }}",
            COMMENT_FIELDS
        );

        let data: Updated = self.client.request(&query, json!({ "id": comment_id, "text": text })).await?;
        data.comment
            .ok_or_else(|| AppError::NotFound("댓글을 찾을 수 없습니다".to_string()))
    }

    /// 댓글을 지우고 남은 댓글 수를 반환합니다. 이미 지워졌으면 404.
    pub async fn delete_comment(&self, comment_id: &str, reel_id: &str) -> Result<i64, AppError> {
        #[derive(Deserialize)]
        struct Deleted {
            #[serde(rename = "delete_Reels_comments_by_pk")]
            comment: Option<serde_json::Value>,
        }

        let data: Deleted = self.client
            .request(
                "mutation DeleteComment($id: uuid!) { delete_Reels_comments_by_pk(id: $id) { id } }",
                json!({ "id": comment_id }),
            )
            .await?;

        if data.comment.is_none() {
            return Err(AppError::NotFound("댓글을 찾을 수 없습니다".to_string()));
        }
        self.decrement_counter(reel_id, "comment_count").await.map(|reel| reel.map_or(0, |r| r.comment_count))
    }

    pub async fn has_liked(&self, reel_id: &str, user_id: &str) -> Result<bool, AppError> {
        #[derive(Deserialize)]
        struct LikesData {
            reel_likes: Vec<serde_json::Value>,
        }

        let data: LikesData = self.client
            .request(
                "query HasLiked($reel_id: uuid!, $user_id: uuid!) { \
                 reel_likes(where: {reel_id: {_eq: $reel_id}, user_id: {_eq: $user_id}}, limit: 1) { id } }",
                json!({ "reel_id": reel_id, "user_id": user_id }),
            )
            .await?;
        Ok(!data.reel_likes.is_empty())
    }

    /// 좋아요 추가 후 갱신된 좋아요 수
    pub async fn add_like(&self, reel_id: &str, user_id: &str) -> Result<i64, AppError> {
        #[derive(Deserialize)]
        struct Liked {
            #[serde(rename = "insert_reel_likes_one")]
            _like: Option<serde_json::Value>,
            #[serde(rename = "update_Reels_by_pk")]
            reel: Option<Reel>,
        }

        let data: Liked = self.client
            .request(
                "mutation AddLike($reel_id: uuid!, $user_id: uuid!) { \
                 insert_reel_likes_one(object: {reel_id: $reel_id, user_id: $user_id}) { id } \
                 update_Reels_by_pk(pk_columns: {id: $reel_id}, _inc: {likes: 1}) { id user_id comment_count likes } }",
                json!({ "reel_id": reel_id, "user_id": user_id }),
            )
            .await?;

        data.reel
            .map(|r| r.likes)
            .ok_or_else(|| AppError::NotFound("릴을 찾을 수 없습니다".to_string()))
    }

    /// 좋아요 취소 후 갱신된 좋아요 수
    pub async fn remove_like(&self, reel_id: &str, user_id: &str) -> Result<i64, AppError> {
        #[derive(Deserialize)]
        struct Unliked {
            #[serde(rename = "delete_reel_likes")]
            result: MutationResult,
        }

        let data: Unliked = self.client
            .request(
                "mutation RemoveLike($reel_id: uuid!, $user_id: uuid!) { \
                 delete_reel_likes(where: {reel_id: {_eq: $reel_id}, user_id: {_eq: $user_id}}) { affected_rows } }",
                json!({ "reel_id": reel_id, "user_id": user_id }),
            )
            .await?;

        if data.result.affected_rows == 0 {
            return Ok(self.find_reel(reel_id).await?.map_or(0, |r| r.likes));
        }
        self.decrement_counter(reel_id, "likes").await.map(|reel| reel.map_or(0, |r| r.likes))
    }

    /// `column`이 0보다 클 때만 1 줄입니다. 이미 0이면 `None`.
    async fn decrement_counter(&self, reel_id: &str, column: &str) -> Result<Option<Reel>, AppError> {
        #[derive(Deserialize)]
        struct Decremented {
            #[serde(rename = "update_Reels")]
            result: Returning,
        }

        #[derive(Deserialize)]
        struct Returning {
            returning: Vec<Reel>,
        }

        let query = format!(
            "mutation DecrementReelCounter($id: uuid!) {{ \
             update_Reels(where: {{id: {{_eq: $id}}, {column}: {{_gt: 0}}}}, _inc: {{{column}: -1}}) {{ \
             returning {{ id user_id comment_count likes }} }} }}"
        );
        let data: Decremented = self.client.request(&query, json!({ "id": reel_id })).await?;
        Ok(data.result.returning.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use serde_json::Value;
    use crate::graphql::testing::{data, FakeHasura};

    fn counters(likes: i64, comment_count: i64) -> impl Fn(&str, &Value) -> (StatusCode, Value) + Send + Sync + 'static {
        move |op: &str, _: &Value| match op {
            "DeleteComment" => data(json!({ "delete_Reels_comments_by_pk": { "id": "c-1" } })),
            "RemoveLike" => data(json!({ "delete_reel_likes": { "affected_rows": 1 } })),
            "DecrementReelCounter" => data(json!({ "update_Reels": { "returning": [
                { "id": "r-1", "user_id": "u-1", "comment_count": comment_count, "likes": likes }
            ] } })),
            "ReelById" => data(json!({ "Reels_by_pk": { "id": "r-1", "user_id": "u-1", "comment_count": comment_count, "likes": likes } })),
            other => (StatusCode::OK, json!({ "errors": [{ "message": format!("unexpected {}", other) }] })),
        }
    }

    #[actix_web::test]
    async fn test_comment_delete_decrements_with_guarded_inc() {
        let hasura = FakeHasura::start(counters(0, 4));
        let repo = ReelRepository::new(hasura.client());

        assert_eq!(repo.delete_comment("c-1", "r-1").await.unwrap(), 4);
        assert_eq!(hasura.operations(), vec!["DeleteComment", "DecrementReelCounter"]);

        let requests = hasura.requests();
        let decrement = &requests[1];
        assert!(decrement.query.contains("comment_count: {_gt: 0}"));
        assert!(decrement.query.contains("_inc: {comment_count: -1}"));
    }

    #[actix_web::test]
    async fn test_deleting_missing_comment_leaves_counter() {
        let hasura = FakeHasura::start(|op, _| match op {
            "DeleteComment" => data(json!({ "delete_Reels_comments_by_pk": null })),
            other => (StatusCode::OK, json!({ "errors": [{ "message": format!("unexpected {}", other) }] })),
        });
        let repo = ReelRepository::new(hasura.client());

        assert!(matches!(repo.delete_comment("c-1", "r-1").await, Err(AppError::NotFound(_))));
        assert_eq!(hasura.operations(), vec!["DeleteComment"]);
    }

    #[actix_web::test]
    async fn test_counter_already_zero_returns_zero() {
        let hasura = FakeHasura::start(|op, _| match op {
            "DeleteComment" => data(json!({ "delete_Reels_comments_by_pk": { "id": "c-1" } })),
            _ => data(json!({ "update_Reels": { "returning": [] } })),
        });
        let repo = ReelRepository::new(hasura.client());

        assert_eq!(repo.delete_comment("c-1", "r-1").await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_unlike_never_reads_then_sets() {
        let hasura = FakeHasura::start(counters(7, 0));
        let repo = ReelRepository::new(hasura.client());

        assert_eq!(repo.remove_like("r-1", "u-2").await.unwrap(), 7);
        assert_eq!(hasura.operations(), vec!["RemoveLike", "DecrementReelCounter"]);
        assert!(hasura.requests()[1].query.contains("_inc: {likes: -1}"));
    }

    #[actix_web::test]
    async fn test_unlike_without_like_row_skips_decrement() {
        let flow = counters(3, 0);
        let hasura = FakeHasura::start(move |op, vars| match op {
            "RemoveLike" => data(json!({ "delete_reel_likes": { "affected_rows": 0 } })),
            _ => flow(op, vars),
        });
        let repo = ReelRepository::new(hasura.client());

        assert_eq!(repo.remove_like("r-1", "u-2").await.unwrap(), 3);
        assert_eq!(hasura.operations(), vec!["RemoveLike", "ReelById"]);
    }
}

crate::impl_repository!(ReelRepository, "reel", "Reels");
