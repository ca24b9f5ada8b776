use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ProfileService;
use crate::models::profiles::requests::CreateProfileRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

pub async fn create_profile(
    service: &ProfileService,
    request: &HttpRequest,
    mut profile_data: CreateProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 字段校验
    if let Err(msg) = validate_username(&profile_data.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ProfileNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&profile_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ProfileEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&profile_data.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfilePasswordInvalid,
            msg,
        )));
    }

    // 用户名/邮箱查重
    match storage
        .get_profile_by_username(&profile_data.username)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ProfileAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check username: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking username",
                )),
            );
        }
    }

    match storage.get_profile_by_email(&profile_data.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ProfileAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check email: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking email",
                )),
            );
        }
    }

    // 哈希密码后入库
    profile_data.password = match hash_password(&profile_data.password) {
        Ok(hash) => hash,
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

    match storage.create_profile(profile_data).await {
        Ok(profile) => {
            info!(
                "Profile {} created with role {}",
                profile.username, profile.role
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(profile, "Profile created successfully")))
        }
        Err(e) => {
            error!("Profile creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Profile creation failed",
                )),
            )
        }
    }
}
