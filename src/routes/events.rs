use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::events::requests::{CreateEventRequest, EventQueryParams, UpdateEventRequest};
use crate::services::EventService;
use crate::utils::SafeEventIdI64;

// 懒加载的全局 EVENT_SERVICE 实例
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

// HTTP处理程序
pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventQueryParams>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(&req, query.into_inner()).await
}

pub async fn create_event(
    req: HttpRequest,
    event_data: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .create_event(&req, event_data.into_inner())
        .await
}

pub async fn get_event(req: HttpRequest, event_id: SafeEventIdI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event(&req, event_id.0).await
}

pub async fn update_event(
    req: HttpRequest,
    event_id: SafeEventIdI64,
    update_data: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(&req, event_id.0, update_data.into_inner())
        .await
}

pub async fn delete_event(req: HttpRequest, event_id: SafeEventIdI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(&req, event_id.0).await
}

pub async fn reset_entry_code(
    req: HttpRequest,
    event_id: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.reset_entry_code(&req, event_id.0).await
}

pub async fn get_event_stats(
    req: HttpRequest,
    event_id: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event_stats(&req, event_id.0).await
}

pub async fn reconcile_event_counters(
    req: HttpRequest,
    event_id: SafeEventIdI64,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .reconcile_event_counters(&req, event_id.0)
        .await
}

// 配置路由
pub fn configure_events_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_events))
                    .route(web::post().to(create_event)),
            )
            .service(
                web::resource("/{event_id}")
                    .route(web::get().to(get_event))
                    .route(web::put().to(update_event))
                    .route(web::delete().to(delete_event)),
            )
            // 重置入口码（旧码立即失效）
            .service(web::resource("/{event_id}/reset-code").route(web::post().to(reset_entry_code)))
            // 仪表盘统计数据
            .service(web::resource("/{event_id}/stats").route(web::get().to(get_event_stats)))
            // 计数器对账
            .service(
                web::resource("/{event_id}/reconcile")
                    .route(web::post().to(reconcile_event_counters)),
            ),
    );
}
