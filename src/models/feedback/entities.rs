use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 情感倾向
//
// 创建时由情感分类服务判定一次，之后不再变更。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub enum Tone {
    Positive, // 正面
    Negative, // 负面
    Neutral,  // 中性
}

impl Tone {
    pub const POSITIVE: &'static str = "positive";
    pub const NEGATIVE: &'static str = "negative";
    pub const NEUTRAL: &'static str = "neutral";
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            Tone::POSITIVE => Ok(Tone::Positive),
            Tone::NEGATIVE => Ok(Tone::Negative),
            Tone::NEUTRAL => Ok(Tone::Neutral),
            _ => Err(serde::de::Error::custom(format!(
                "无效的情感倾向: '{s}'. 支持的值: positive, negative, neutral"
            ))),
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Positive => write!(f, "{}", Tone::POSITIVE),
            Tone::Negative => write!(f, "{}", Tone::NEGATIVE),
            Tone::Neutral => write!(f, "{}", Tone::NEUTRAL),
        }
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Tone::Positive),
            "negative" => Ok(Tone::Negative),
            "neutral" => Ok(Tone::Neutral),
            _ => Err(format!("Invalid tone: {s}")),
        }
    }
}

// 反馈实体（匿名，无提交者信息）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct Feedback {
    pub id: i64,
    pub event_id: i64,
    pub content: String,
    pub tone: Tone,
    pub is_reviewed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
