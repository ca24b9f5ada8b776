use serde::Serialize;
use ts_rs::TS;

// 关键词频次
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct KeywordCount {
    pub word: String,
    pub count: i64,
}

// 活动统计响应（仪表盘图表数据源）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventStatsResponse {
    pub event_id: i64,
    pub total_feedback_count: i32,
    pub positive_feedback_count: i32,
    pub negative_feedback_count: i32,
    pub neutral_feedback_count: i32,
    // 百分比保留两位小数，总数为 0 时全部为 0
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
    pub reviewed_count: i64,
    pub unreviewed_count: i64,
    pub keywords: Vec<KeywordCount>,
}
