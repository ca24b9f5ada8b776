use super::entities::Feedback;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 反馈列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Feedback>,
}
