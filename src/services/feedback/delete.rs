use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{FeedbackService, ensure_event_access};
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先定位反馈，再校验其所属活动的管理权限
    let feedback = match storage.get_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) => feedback,
        Ok(None) => {
            // 重复删除同一 ID 会走到这里：计数器不受影响
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeedbackNotFound,
                "Feedback not found",
            )));
        }
        Err(e) => {
            error!("Failed to get feedback {}: {}", feedback_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching feedback",
                )),
            );
        }
    };

    if let Err(resp) = ensure_event_access(&storage, request, feedback.event_id).await {
        return Ok(resp);
    }

    // 删除与计数器递减在同一事务内完成
    match storage.delete_feedback(feedback_id).await {
        Ok(true) => {
            info!(
                "Feedback {} deleted from event {}",
                feedback_id, feedback.event_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Feedback deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "Feedback not found",
        ))),
        Err(e) => {
            error!("Failed to delete feedback {}: {}", feedback_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete feedback",
                )),
            )
        }
    }
}
