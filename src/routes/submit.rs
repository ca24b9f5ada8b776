use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedback::requests::SubmitFeedbackRequest;
use crate::services::FeedbackService;
use crate::utils::SafeEntryCode;

// 懒加载的全局 FEEDBACK_SERVICE 实例（学生端复用反馈服务）
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

// HTTP处理程序
pub async fn submit_feedback(
    req: HttpRequest,
    submit_data: web::Json<SubmitFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .submit_feedback(&req, submit_data.into_inner())
        .await
}

pub async fn lookup_entry_code(req: HttpRequest, code: SafeEntryCode) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.lookup_entry_code(&req, code.0).await
}

// 配置路由（学生端匿名提交，无需认证）
pub fn configure_submit_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submit")
            .service(
                web::resource("")
                    .route(web::post().to(submit_feedback))
                    // 匿名端点按 IP 限流
                    .wrap(middlewares::RateLimit::submission()),
            )
            .service(
                web::resource("/{code}")
                    .route(web::get().to(lookup_entry_code))
                    // 防止入口码暴力枚举
                    .wrap(middlewares::RateLimit::entry_code()),
            ),
    );
}
