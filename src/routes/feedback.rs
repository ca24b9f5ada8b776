use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedback::requests::{FeedbackQueryParams, ReviewFeedbackRequest};
use crate::services::FeedbackService;
use crate::utils::{SafeEventIdI64, SafeFeedbackIdI64};

// 懒加载的全局 FEEDBACK_SERVICE 实例
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

// HTTP处理程序
pub async fn list_event_feedback(
    req: HttpRequest,
    event_id: SafeEventIdI64,
    query: web::Query<FeedbackQueryParams>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .list_event_feedback(&req, event_id.0, query.into_inner())
        .await
}

pub async fn review_feedback(
    req: HttpRequest,
    feedback_id: SafeFeedbackIdI64,
    review_data: web::Json<ReviewFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .review_feedback(&req, feedback_id.0, review_data.into_inner())
        .await
}

pub async fn delete_feedback(
    req: HttpRequest,
    feedback_id: SafeFeedbackIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.delete_feedback(&req, feedback_id.0).await
}

// 配置路由（教师端反馈管理）
pub fn configure_feedback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events/{event_id}/feedback")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_event_feedback))),
    );
    cfg.service(
        web::scope("/api/v1/feedback")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/{feedback_id}").route(web::delete().to(delete_feedback)))
            .service(web::resource("/{feedback_id}/review").route(web::put().to(review_feedback))),
    );
}
