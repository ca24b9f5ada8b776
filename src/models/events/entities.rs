use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 活动状态
//
// 生命周期：open → closed → archived（允许 open → archived 直接归档），
// 不允许重新开放。入口码只在 open 状态下可被学生解析。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub enum EventStatus {
    Open,     // 收集中
    Closed,   // 已关闭
    Archived, // 已归档
}

impl EventStatus {
    pub const OPEN: &'static str = "open";
    pub const CLOSED: &'static str = "closed";
    pub const ARCHIVED: &'static str = "archived";

    /// 检查状态转换是否合法
    pub fn can_transition_to(self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (EventStatus::Open, EventStatus::Closed)
                | (EventStatus::Open, EventStatus::Archived)
                | (EventStatus::Closed, EventStatus::Archived)
        )
    }
}

impl<'de> Deserialize<'de> for EventStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            EventStatus::OPEN => Ok(EventStatus::Open),
            EventStatus::CLOSED => Ok(EventStatus::Closed),
            EventStatus::ARCHIVED => Ok(EventStatus::Archived),
            _ => Err(serde::de::Error::custom(format!(
                "无效的活动状态: '{s}'. 支持的状态: open, closed, archived"
            ))),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Open => write!(f, "{}", EventStatus::OPEN),
            EventStatus::Closed => write!(f, "{}", EventStatus::CLOSED),
            EventStatus::Archived => write!(f, "{}", EventStatus::ARCHIVED),
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(EventStatus::Open),
            "closed" => Ok(EventStatus::Closed),
            "archived" => Ok(EventStatus::Archived),
            _ => Err(format!("Invalid event status: {s}")),
        }
    }
}

// 活动实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct Event {
    pub id: i64,
    pub course_id: i64,
    pub event_date: chrono::DateTime<chrono::Utc>,
    pub status: EventStatus,
    pub entry_code: String,
    pub positive_feedback_count: i32,
    pub negative_feedback_count: i32,
    pub neutral_feedback_count: i32,
    pub total_feedback_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 活动计数器快照（对账接口返回修正后的值）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventCounters {
    pub positive_feedback_count: i32,
    pub negative_feedback_count: i32,
    pub neutral_feedback_count: i32,
    pub total_feedback_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(EventStatus::Open.can_transition_to(EventStatus::Closed));
        assert!(EventStatus::Open.can_transition_to(EventStatus::Archived));
        assert!(EventStatus::Closed.can_transition_to(EventStatus::Archived));
    }

    #[test]
    fn test_no_reopening() {
        assert!(!EventStatus::Closed.can_transition_to(EventStatus::Open));
        assert!(!EventStatus::Archived.can_transition_to(EventStatus::Open));
        assert!(!EventStatus::Archived.can_transition_to(EventStatus::Closed));
        assert!(!EventStatus::Open.can_transition_to(EventStatus::Open));
    }
}
