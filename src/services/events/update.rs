use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{EventService, ensure_event_access};
use crate::models::events::requests::UpdateEventRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    update_data: UpdateEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let event = match ensure_event_access(&storage, request, event_id).await {
        Ok(event) => event,
        Err(resp) => return Ok(resp),
    };

    // 状态转换校验：只允许 open→closed、open→archived、closed→archived
    if let Some(next_status) = update_data.status
        && !event.status.can_transition_to(next_status)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EventStatusInvalid,
            format!(
                "Cannot transition event status from {} to {}",
                event.status, next_status
            ),
        )));
    }

    match storage.update_event(event_id, update_data).await {
        Ok(Some(updated)) => {
            info!("Event {} updated (status: {})", event_id, updated.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Event updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "Event not found",
        ))),
        Err(e) => {
            error!("Failed to update event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update event",
                )),
            )
        }
    }
}
