use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, ensure_course_access};
use crate::models::ApiResponse;

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match ensure_course_access(&storage, request, course_id).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "查询成功"))),
        Err(resp) => Ok(resp),
    }
}
