use crate::models::common::PaginationQuery;
use crate::models::events::entities::EventStatus;
use serde::Deserialize;
use ts_rs::TS;

// 活动查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    pub status: Option<EventStatus>,
}

// 创建活动请求（入口码由服务端生成，不接受客户端指定）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CreateEventRequest {
    pub course_id: i64,
    pub event_date: chrono::DateTime<chrono::Utc>,
}

// 更新活动请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct UpdateEventRequest {
    pub event_date: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<EventStatus>,
}

// 活动列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<EventStatus>,
}
