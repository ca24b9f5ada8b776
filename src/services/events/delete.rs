use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{EventService, ensure_event_access};
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_event_access(&storage, request, event_id).await {
        return Ok(resp);
    }

    // 删除活动时级联删除其全部反馈
    match storage.delete_event(event_id).await {
        Ok(true) => {
            info!("Event {} deleted with its feedback", event_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Event deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "Event not found",
        ))),
        Err(e) => {
            error!("Failed to delete event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete event",
                )),
            )
        }
    }
}
