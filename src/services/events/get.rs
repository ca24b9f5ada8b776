use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EventService, ensure_event_access};
use crate::models::ApiResponse;

pub async fn get_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match ensure_event_access(&storage, request, event_id).await {
        Ok(event) => Ok(HttpResponse::Ok().json(ApiResponse::success(event, "查询成功"))),
        Err(resp) => Ok(resp),
    }
}
