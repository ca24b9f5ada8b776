//! 匿名提交流程（学生端）
//!
//! 提交路径：入口码解析 → 情感分类 → 反馈落库 + 计数器递增（同一事务）。
//! 所有失败都以可恢复的错误响应返回，提交页不会收到 5xx 之外的意外崩溃。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::FeedbackService;
use crate::errors::EvaloError;
use crate::models::events::responses::PublicEventInfo;
use crate::models::feedback::requests::SubmitFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::utils::validate::{normalize_entry_code, validate_feedback_content};

pub async fn submit_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    submit_data: SubmitFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let classifier = service.get_classifier(request);

    // 1. 入口码格式校验（大小写不敏感）
    let code = match normalize_entry_code(&submit_data.entry_code) {
        Ok(code) => code,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::EntryCodeInvalid, msg)));
        }
    };

    // 2. 内容校验（裁剪空白，非空，长度上限）
    let max_content_length = DynamicConfig::feedback_max_content_length().await;
    let content = match validate_feedback_content(&submit_data.content, max_content_length) {
        Ok(content) => content,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ContentInvalid, msg)));
        }
    };

    // 3. 解析入口码：只匹配 open 活动，关闭/归档/不存在的码一律视为无效
    let event = match storage.get_open_event_by_code(&code).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EntryCodeInvalid,
                "Invalid or expired entry code",
            )));
        }
        Err(e) => {
            error!("Failed to resolve entry code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve entry code",
                )),
            );
        }
    };

    // 4. 情感分类：分类服务不可用时拒绝提交，不落库
    let tone = match classifier.classify(&content).await {
        Ok(tone) => tone,
        Err(e) => {
            error!("Sentiment classification failed: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::ClassificationUnavailable,
                    "Feedback could not be classified, please try again later",
                )),
            );
        }
    };

    // 5. 反馈落库 + 计数器递增（同一事务）
    match storage.create_feedback(event.id, &content, tone).await {
        Ok(feedback) => {
            info!(
                "Anonymous feedback submitted to event {} with tone {}",
                event.id, feedback.tone
            );
            // 匿名设计：不向学生返回反馈 ID 或任何可追溯的回执
            Ok(HttpResponse::Created()
                .json(ApiResponse::success_empty("Feedback submitted successfully")))
        }
        Err(EvaloError::CounterUpdate(msg)) => {
            error!("Counter update failed, feedback rolled back: {}", msg);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CounterUpdateFailed,
                    "Failed to record feedback, please try again",
                )),
            )
        }
        Err(e) => {
            error!("Failed to persist feedback: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to record feedback, please try again",
                )),
            )
        }
    }
}

/// 通过入口码查询活动公开信息（学生提交前的确认页）
pub async fn lookup_entry_code(
    service: &FeedbackService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let event = match storage.get_open_event_by_code(&code).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EntryCodeInvalid,
                "Invalid or expired entry code",
            )));
        }
        Err(e) => {
            error!("Failed to resolve entry code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve entry code",
                )),
            );
        }
    };

    let course_name = match storage.get_course_by_id(event.course_id).await {
        Ok(Some(course)) => course.name,
        Ok(None) => {
            // 活动存在但课程消失：引用完整性异常，按无效码处理而不是崩溃
            error!("Event {} references missing course {}", event.id, event.course_id);
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EntryCodeInvalid,
                "Invalid or expired entry code",
            )));
        }
        Err(e) => {
            error!("Failed to get course {}: {}", event.course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to resolve entry code",
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PublicEventInfo {
            course_name,
            event_date: event.event_date,
        },
        "Entry code resolved",
    )))
}
