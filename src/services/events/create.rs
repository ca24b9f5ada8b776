use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EventService;
use crate::errors::EvaloError;
use crate::models::events::requests::CreateEventRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::ensure_course_access;

pub async fn create_event(
    service: &EventService,
    request: &HttpRequest,
    event_data: CreateEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：活动必须创建在自己的课程下（院长/管理员不受限）
    if let Err(resp) = ensure_course_access(&storage, request, event_data.course_id).await {
        return Ok(resp);
    }

    match storage.create_event(event_data).await {
        Ok(event) => {
            info!(
                "Event {} created for course {} with entry code {}",
                event.id, event.course_id, event.entry_code
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(event, "Event created successfully")))
        }
        Err(EvaloError::EntryCodeExhausted(msg)) => {
            error!("Entry code generation failed: {}", msg);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EntryCodeGenerationFailed,
                    "Failed to generate a unique entry code, please retry",
                )),
            )
        }
        Err(e) => {
            error!("Event creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Event creation failed",
                )),
            )
        }
    }
}
