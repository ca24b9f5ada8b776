use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EventService;
use crate::middlewares::RequireJWT;
use crate::models::events::requests::{EventListQuery, EventQueryParams};
use crate::models::profiles::entities::ProfileRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::ensure_course_access;

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
    query: EventQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let role = RequireJWT::extract_profile_role(request);

    // 指定课程时校验课程归属；未指定课程的全量列表仅院长/管理员可用
    match query.course_id {
        Some(course_id) => {
            if let Err(resp) = ensure_course_access(&storage, request, course_id).await {
                return Ok(resp);
            }
        }
        None => {
            if !matches!(role, Some(ProfileRole::Dean) | Some(ProfileRole::Admin)) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "course_id is required for teachers",
                )));
            }
        }
    }

    let list_query = EventListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course_id,
        status: query.status,
    };

    match storage.list_events_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list events: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list events",
                )),
            )
        }
    }
}
