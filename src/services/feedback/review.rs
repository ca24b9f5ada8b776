use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{FeedbackService, ensure_event_access};
use crate::models::feedback::requests::ReviewFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn review_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: i64,
    review_data: ReviewFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先定位反馈，再校验其所属活动的管理权限
    let feedback = match storage.get_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) => feedback,
        Ok(None) => {
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

    match storage
        .set_feedback_reviewed(feedback_id, review_data.is_reviewed)
        .await
    {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Feedback review state updated",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "Feedback not found",
        ))),
        Err(e) => {
            error!("Failed to update feedback {}: {}", feedback_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update feedback",
                )),
            )
        }
    }
}
