use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::profiles::entities::ProfileRole;
use crate::models::system::requests::UpdateSettingsRequest;
use crate::models::system::responses::SystemStatusResponse;
use crate::models::{ApiResponse, AppStartTime};
use crate::services::SystemService;
use crate::services::system::DynamicConfig;
use crate::utils::SafeSettingKey;

// 懒加载的全局 SYSTEM_SERVICE 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

// HTTP处理程序
pub async fn get_system_status(req: HttpRequest) -> ActixResult<HttpResponse> {
    let config = crate::config::AppConfig::get();

    let uptime_seconds = req
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    let response = SystemStatusResponse {
        system_name: DynamicConfig::system_name().await,
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}

pub async fn list_settings(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.list_settings(&req).await
}

pub async fn get_setting(req: HttpRequest, key: SafeSettingKey) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_setting(&req, key.0).await
}

pub async fn update_settings(
    req: HttpRequest,
    update_data: web::Json<UpdateSettingsRequest>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .update_settings(&req, update_data.into_inner())
        .await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            // 健康检查/运行状态（公开）
            .service(web::resource("/status").route(web::get().to(get_system_status)))
            .service(
                web::scope("/settings")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("")
                            .route(
                                web::get()
                                    .to(list_settings)
                                    // 设置页仅管理员可用
                                    .wrap(middlewares::RequireRole::new_any(
                                        ProfileRole::admin_roles(),
                                    )),
                            )
                            .route(
                                web::put()
                                    .to(update_settings)
                                    .wrap(middlewares::RequireRole::new_any(
                                        ProfileRole::admin_roles(),
                                    )),
                            ),
                    )
                    .service(
                        web::resource("/{key}").route(
                            web::get()
                                .to(get_setting)
                                .wrap(middlewares::RequireRole::new_any(
                                    ProfileRole::admin_roles(),
                                )),
                        ),
                    ),
            ),
    );
}
