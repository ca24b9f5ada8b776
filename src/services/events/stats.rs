use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::error;

use super::{EventService, ensure_event_access};
use crate::models::events::stats_responses::{EventStatsResponse, KeywordCount};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;

/// 关键词统计忽略的常见虚词
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "were", "this", "that", "with", "from", "have", "has",
    "had", "not", "but", "you", "your", "our", "very", "too", "much", "more", "less",
    "there", "their", "they", "them", "then", "than", "what", "when", "which", "would", "could",
    "should", "about", "into", "because", "been", "being", "also", "just", "really", "some",
    "most", "all", "can", "will", "its", "it's", "i'm", "don't", "didn't", "wasn't",
];

pub async fn get_event_stats(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let event = match ensure_event_access(&storage, request, event_id).await {
        Ok(event) => event,
        Err(resp) => return Ok(resp),
    };

    // 关键词与已读统计需要全部反馈行
    let feedback = match storage.list_event_feedback(event_id).await {
        Ok(feedback) => feedback,
        Err(e) => {
            error!("Failed to load feedback for event {}: {}", event_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load feedback",
                )),
            );
        }
    };

    let reviewed_count = feedback.iter().filter(|f| f.is_reviewed).count() as i64;
    let unreviewed_count = feedback.len() as i64 - reviewed_count;

    let contents: Vec<&str> = feedback.iter().map(|f| f.content.as_str()).collect();
    let keyword_limit = DynamicConfig::stats_keyword_limit().await;
    let keywords = keyword_frequencies(&contents, keyword_limit);

    let total = event.total_feedback_count;
    let response = EventStatsResponse {
        event_id,
        total_feedback_count: total,
        positive_feedback_count: event.positive_feedback_count,
        negative_feedback_count: event.negative_feedback_count,
        neutral_feedback_count: event.neutral_feedback_count,
        positive_percentage: percentage(event.positive_feedback_count, total),
        negative_percentage: percentage(event.negative_feedback_count, total),
        neutral_percentage: percentage(event.neutral_feedback_count, total),
        reviewed_count,
        unreviewed_count,
        keywords,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}

/// 计算占比（保留两位小数，总数为 0 时返回 0）
fn percentage(count: i32, total: i32) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}

/// 统计反馈文本中的关键词频次
///
/// 小写化后按非字母数字切分，丢弃短词和常见虚词，
/// 频次相同的按字典序排序保证输出稳定。
fn keyword_frequencies(texts: &[&str], top_n: usize) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, i64> = HashMap::new();

    for text in texts {
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
        {
            let token = token.trim_matches('\'');
            if token.len() < 3 || STOP_WORDS.contains(&token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    let mut keywords: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(word, count)| KeywordCount { word, count })
        .collect();

    keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    keywords.truncate(top_n);
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 5), 100.0);
    }

    #[test]
    fn test_keyword_frequencies() {
        let texts = vec![
            "Great lecture, great examples",
            "The examples were confusing",
            "lecture pace too fast",
        ];
        let keywords = keyword_frequencies(&texts, 10);

        let get = |word: &str| keywords.iter().find(|k| k.word == word).map(|k| k.count);
        assert_eq!(get("great"), Some(2));
        assert_eq!(get("examples"), Some(2));
        assert_eq!(get("lecture"), Some(2));
        assert_eq!(get("confusing"), Some(1));
        // 虚词与短词被过滤
        assert_eq!(get("the"), None);
        assert_eq!(get("too"), None);
    }

    #[test]
    fn test_keyword_top_n_and_ordering() {
        let texts = vec!["alpha alpha beta beta gamma"];
        let keywords = keyword_frequencies(&texts, 2);
        assert_eq!(keywords.len(), 2);
        // 同频次时按字典序
        assert_eq!(keywords[0].word, "alpha");
        assert_eq!(keywords[1].word, "beta");
    }

    #[test]
    fn test_keyword_empty_input() {
        assert!(keyword_frequencies(&[], 10).is_empty());
        assert!(keyword_frequencies(&["a an of"], 10).is_empty());
    }
}
