use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::profiles::entities::ProfileRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let role = RequireJWT::extract_profile_role(request);
    let storage = service.get_storage(request);

    let profile_id = match RequireJWT::extract_profile_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing profile id",
            )));
        }
    };

    // 权限校验 + 归属教师确定
    if let Err(resp) =
        check_course_create_permission(role, profile_id, &mut course_data, &storage).await
    {
        return Ok(resp);
    }

    if course_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Course name must not be empty",
        )));
    }

    // 创建课程
    match storage.create_course(course_data).await {
        Ok(course) => {
            info!("Course {} created by profile {}", course.name, profile_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(handle_course_create_error(&e.to_string())),
    }
}

/// 权限校验辅助函数
///
/// 教师只能以自己为授课教师创建课程；院长/管理员可以为任意教师创建，
/// 但目标账号必须存在且是教师角色。
async fn check_course_create_permission(
    role: Option<ProfileRole>,
    profile_id: i64,
    course_data: &mut CreateCourseRequest,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match role {
        Some(ProfileRole::Dean) | Some(ProfileRole::Admin) => {
            let teacher_id = course_data.teacher_id.unwrap_or(profile_id);
            course_data.teacher_id = Some(teacher_id);

            if teacher_id == profile_id {
                return Ok(());
            }

            match storage.get_profile_by_id(teacher_id).await {
                Ok(Some(profile)) => {
                    if profile.role != ProfileRole::Teacher {
                        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::CoursePermissionDenied,
                            "Courses can only be assigned to teachers",
                        )));
                    }
                }
                Ok(None) => {
                    return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::ProfileNotFound,
                        "Teacher not found",
                    )));
                }
                Err(e) => {
                    error!("Failed to get profile by id: {}", e);
                    return Err(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching profile",
                        )),
                    );
                }
            }
        }
        Some(ProfileRole::Teacher) => {
            if let Some(teacher_id) = course_data.teacher_id
                && teacher_id != profile_id
            {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "You do not have permission to create a course for another teacher",
                )));
            }
            course_data.teacher_id = Some(profile_id);
        }
        _ => {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::CoursePermissionDenied,
                "You do not have permission to create a course",
            )));
        }
    }
    Ok(())
}

/// 错误响应辅助函数
fn handle_course_create_error(e: &str) -> HttpResponse {
    let msg = format!("Course creation failed: {e}");
    error!("{}", msg);
    if msg.contains("FOREIGN KEY constraint failed") {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "Teacher does not exist",
        ))
    } else {
        HttpResponse::InternalServerError()
            .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg))
    }
}
