pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod reconcile;
pub mod reset_code;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::events::entities::Event;
use crate::models::events::requests::{CreateEventRequest, EventQueryParams, UpdateEventRequest};
use crate::models::profiles::entities::ProfileRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取活动列表
    pub async fn list_events(
        &self,
        request: &HttpRequest,
        query: EventQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, request, query).await
    }

    // 创建活动（入口码自动生成）
    pub async fn create_event(
        &self,
        request: &HttpRequest,
        event_data: CreateEventRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, request, event_data).await
    }

    // 根据活动 ID 获取活动信息
    pub async fn get_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_event(self, request, event_id).await
    }

    // 更新活动（日期、状态转换）
    pub async fn update_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
        update_data: UpdateEventRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, request, event_id, update_data).await
    }

    // 重置活动入口码
    pub async fn reset_entry_code(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        reset_code::reset_entry_code(self, request, event_id).await
    }

    // 活动统计（计数、占比、关键词）
    pub async fn get_event_stats(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        stats::get_event_stats(self, request, event_id).await
    }

    // 计数器对账
    pub async fn reconcile_event_counters(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        reconcile::reconcile_event_counters(self, request, event_id).await
    }

    // 删除活动
    pub async fn delete_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_event(self, request, event_id).await
    }
}

/// 校验当前登录账号是否可以管理指定活动
///
/// 教师只能管理自己课程下的活动，院长和管理员不受限制。
/// 返回活动实体；无权限或活动不存在时返回错误响应。
pub(crate) async fn ensure_event_access(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    event_id: i64,
) -> Result<Event, HttpResponse> {
    let profile_id = match RequireJWT::extract_profile_id(request) {
        Some(id) => id,
        None => {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing profile id",
            )));
        }
    };
    let role = RequireJWT::extract_profile_role(request);

    let event = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EventNotFound,
                "Event not found",
            )));
        }
        Err(e) => {
            error!("Failed to get event {}: {}", event_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching event",
                )),
            );
        }
    };

    // 院长和管理员可以管理所有课程的活动
    if matches!(role, Some(ProfileRole::Dean) | Some(ProfileRole::Admin)) {
        return Ok(event);
    }

    let course = match storage.get_course_by_id(event.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Failed to get course {}: {}", event.course_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching course",
                )),
            );
        }
    };

    if course.teacher_id != profile_id {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have permission to manage this event",
        )));
    }

    Ok(event)
}
