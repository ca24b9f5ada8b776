use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ProfileService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_profile(
    service: &ProfileService,
    request: &HttpRequest,
    profile_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 禁止删除当前登录账号
    if RequireJWT::extract_profile_id(request) == Some(profile_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CannotDeleteCurrentProfile,
            "You cannot delete the currently logged-in profile",
        )));
    }

    // 级联删除其名下课程、活动与反馈
    match storage.delete_profile(profile_id).await {
        Ok(true) => {
            info!("Profile {} deleted", profile_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Profile deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "Profile not found",
        ))),
        Err(e) => {
            error!("Failed to delete profile {}: {}", profile_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete profile",
                )),
            )
        }
    }
}
