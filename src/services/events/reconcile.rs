//! 计数器对账
//!
//! 计数器与反馈行的一致性由事务保证，但外部因素（人工修库、
//! 备份恢复）仍可能造成漂移。本接口从 feedback 表重算计数并写回，
//! 是发现漂移后的修正通道，而不是常规提交路径的一部分。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::{EventService, ensure_event_access};
use crate::models::{ApiResponse, ErrorCode};

pub async fn reconcile_event_counters(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let event = match ensure_event_access(&storage, request, event_id).await {
        Ok(event) => event,
        Err(resp) => return Ok(resp),
    };

    match storage.recount_event_counters(event_id).await {
        Ok(counters) => {
            let drifted = counters.positive_feedback_count != event.positive_feedback_count
                || counters.negative_feedback_count != event.negative_feedback_count
                || counters.neutral_feedback_count != event.neutral_feedback_count
                || counters.total_feedback_count != event.total_feedback_count;

            if drifted {
                warn!(
                    "Counter drift corrected on event {}: stored ({}, {}, {}, {}) -> actual ({}, {}, {}, {})",
                    event_id,
                    event.positive_feedback_count,
                    event.negative_feedback_count,
                    event.neutral_feedback_count,
                    event.total_feedback_count,
                    counters.positive_feedback_count,
                    counters.negative_feedback_count,
                    counters.neutral_feedback_count,
                    counters.total_feedback_count,
                );
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(counters, "Counters reconciled")))
        }
        Err(e) => {
            error!("Failed to reconcile event {}: {}", event_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to reconcile counters",
                )),
            )
        }
    }
}
