use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{FeedbackService, ensure_event_access};
use crate::models::feedback::requests::{FeedbackListQuery, FeedbackQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_event_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    event_id: i64,
    query: FeedbackQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：活动必须属于当前教师的课程（院长/管理员除外）
    let event = match ensure_event_access(&storage, request, event_id).await {
        Ok(event) => event,
        Err(resp) => return Ok(resp),
    };

    let list_query = FeedbackListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        tone: query.tone,
        is_reviewed: query.is_reviewed,
    };

    match storage
        .list_feedback_with_pagination(event.id, list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list feedback for event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list feedback",
                )),
            )
        }
    }
}
