use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ProfileService;
use crate::middlewares::RequireJWT;
use crate::models::profiles::entities::ProfileRole;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

pub async fn update_profile(
    service: &ProfileService,
    request: &HttpRequest,
    profile_id: i64,
    mut update_data: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let role = RequireJWT::extract_profile_role(request);

    let requester_id = match RequireJWT::extract_profile_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing profile id",
            )));
        }
    };

    let is_dean = matches!(role, Some(ProfileRole::Dean) | Some(ProfileRole::Admin));

    // 教师只能更新自己的账号，且不能改角色和状态
    if !is_dean {
        if profile_id != requester_id {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "You do not have permission to update this profile",
            )));
        }
        if update_data.role.is_some() || update_data.status.is_some() {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "You do not have permission to change role or status",
            )));
        }
    }

    // 字段校验
    if let Some(ref email) = update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ProfileEmailInvalid, msg)));
    }

    if let Some(ref password) = update_data.password {
        if let Err(msg) = validate_password_simple(password) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ProfilePasswordInvalid,
                msg,
            )));
        }
        update_data.password = match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                error!("Failed to hash password: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to process password",
                    )),
                );
            }
        };
    }

    match storage.update_profile(profile_id, update_data).await {
        Ok(Some(profile)) => {
            info!("Profile {} updated by {}", profile_id, requester_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(profile, "Profile updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "Profile not found",
        ))),
        Err(e) => {
            error!("Failed to update profile {}: {}", profile_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update profile",
                )),
            )
        }
    }
}
