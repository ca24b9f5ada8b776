//! 情感分类客户端
//!
//! 反馈文本的情感判定委托给外部分类服务，服务端只信任返回的标签，
//! 不做本地重算。分类服务不可用时整个提交失败（见 FeedbackService），
//! 不会以默认情感落库。

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::{EvaloError, Result};
use crate::models::feedback::entities::Tone;

/// 情感分类能力接口
///
/// 唯一实现是 HTTP 客户端；测试中以固定结果的桩实现替换。
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Tone>;
}

/// 分类请求体
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
    detail: bool,
}

/// 分类响应体（至少包含 tone 标签）
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    tone: String,
    #[serde(default)]
    confidence: Option<f64>,
}

/// 基于 HTTP 的情感分类客户端
pub struct HttpSentimentClassifier {
    client: reqwest::Client,
    url: String,
    api_key: String,
    detail: bool,
}

impl HttpSentimentClassifier {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.sentiment.timeout))
            .build()
            .map_err(|e| {
                EvaloError::classification_unavailable(format!("HTTP 客户端构建失败: {e}"))
            })?;

        Ok(Self {
            client,
            url: config.sentiment.url.clone(),
            api_key: config.sentiment.api_key.clone(),
            detail: config.sentiment.detail,
        })
    }

    fn parse_tone(raw: &str) -> Result<Tone> {
        raw.parse::<Tone>().map_err(|_| {
            EvaloError::classification_unavailable(format!("分类服务返回未知情感标签: {raw}"))
        })
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<Tone> {
        let mut request = self.client.post(&self.url).json(&ClassifyRequest {
            text,
            detail: self.detail,
        });

        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        // reqwest::Error 经 From 转换为 ClassificationUnavailable
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvaloError::classification_unavailable(format!(
                "分类服务返回 {status}"
            )));
        }

        let body: ClassifyResponse = response.json().await.map_err(|e| {
            EvaloError::classification_unavailable(format!("分类响应解析失败: {e}"))
        })?;

        let tone = Self::parse_tone(&body.tone)?;
        debug!(
            "Classified feedback as {} (confidence: {:?})",
            tone, body.confidence
        );

        Ok(tone)
    }
}

/// 创建分类器实例（启动时调用）
pub fn create_classifier() -> Result<Arc<dyn SentimentClassifier>> {
    Ok(Arc::new(HttpSentimentClassifier::new()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tone_labels() {
        assert_eq!(
            HttpSentimentClassifier::parse_tone("positive").unwrap(),
            Tone::Positive
        );
        assert_eq!(
            HttpSentimentClassifier::parse_tone("negative").unwrap(),
            Tone::Negative
        );
        assert_eq!(
            HttpSentimentClassifier::parse_tone("neutral").unwrap(),
            Tone::Neutral
        );
        assert!(HttpSentimentClassifier::parse_tone("mixed").is_err());
        assert!(HttpSentimentClassifier::parse_tone("").is_err());
    }

    #[test]
    fn test_classify_response_deserialization() {
        let with_confidence: ClassifyResponse =
            serde_json::from_str(r#"{"tone":"positive","confidence":0.93}"#).unwrap();
        assert_eq!(with_confidence.tone, "positive");
        assert_eq!(with_confidence.confidence, Some(0.93));

        let bare: ClassifyResponse = serde_json::from_str(r#"{"tone":"neutral"}"#).unwrap();
        assert_eq!(bare.tone, "neutral");
        assert_eq!(bare.confidence, None);

        // 缺少 tone 字段视为格式错误
        assert!(serde_json::from_str::<ClassifyResponse>(r#"{"confidence":0.5}"#).is_err());
    }
}
