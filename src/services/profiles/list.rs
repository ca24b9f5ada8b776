use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ProfileService;
use crate::models::profiles::requests::{ProfileListQuery, ProfileQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_profiles(
    service: &ProfileService,
    request: &HttpRequest,
    query: ProfileQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = ProfileListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: query.role,
        search: query.search,
    };

    match storage.list_profiles_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list profiles: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list profiles",
                )),
            )
        }
    }
}
