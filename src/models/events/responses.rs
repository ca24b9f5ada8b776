use super::entities::Event;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 活动列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Event>,
}

// 公开的活动信息（学生输入入口码后看到的内容，不暴露计数器）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct PublicEventInfo {
    pub course_name: String,
    pub event_date: chrono::DateTime<chrono::Utc>,
}
