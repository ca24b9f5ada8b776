use crate::models::common::PaginationQuery;
use crate::models::feedback::entities::Tone;
use serde::Deserialize;
use ts_rs::TS;

// 匿名提交请求（学生端）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct SubmitFeedbackRequest {
    pub entry_code: String,
    pub content: String,
}

// 反馈查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub tone: Option<Tone>,
    pub is_reviewed: Option<bool>,
}

// 标记已读请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct ReviewFeedbackRequest {
    pub is_reviewed: bool,
}

// 反馈列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub tone: Option<Tone>,
    pub is_reviewed: Option<bool>,
}
