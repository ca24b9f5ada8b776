use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{EventService, ensure_event_access};
use crate::errors::EvaloError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn reset_entry_code(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_event_access(&storage, request, event_id).await {
        return Ok(resp);
    }

    match storage.reset_entry_code(event_id).await {
        Ok(Some(event)) => {
            info!(
                "Entry code for event {} reset to {}",
                event_id, event.entry_code
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(event, "Entry code reset")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EventNotFound,
            "Event not found",
        ))),
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
            error!("Failed to reset entry code for event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to reset entry code",
                )),
            )
        }
    }
}
