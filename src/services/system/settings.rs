use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{DynamicConfig, SystemService};
use crate::models::system::requests::UpdateSettingsRequest;
use crate::models::system::responses::SettingsResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_all_settings().await {
        Ok(items) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(SettingsResponse { items }, "查询成功")))
        }
        Err(e) => {
            error!("Failed to list settings: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list settings",
                )),
            )
        }
    }
}

pub async fn get_setting(
    service: &SystemService,
    request: &HttpRequest,
    key: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_setting(&key).await {
        Ok(Some(setting)) => Ok(HttpResponse::Ok().json(ApiResponse::success(setting, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SettingNotFound,
            "Setting not found",
        ))),
        Err(e) => {
            error!("Failed to get setting {}: {}", key, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get setting",
                )),
            )
        }
    }
}

pub async fn update_settings(
    service: &SystemService,
    request: &HttpRequest,
    update_data: UpdateSettingsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if update_data.settings.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "No settings provided",
        )));
    }

    let mut updated = Vec::with_capacity(update_data.settings.len());
    for (key, value) in &update_data.settings {
        match storage.upsert_setting(key, value).await {
            Ok(setting) => {
                // 写库成功后同步动态配置缓存
                DynamicConfig::update(key, value).await;
                updated.push(setting);
            }
            Err(e) => {
                error!("Failed to update setting {}: {}", key, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to update setting: {key}"),
                    )),
                );
            }
        }
    }

    info!("Updated {} system setting(s)", updated.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SettingsResponse { items: updated },
        "Settings updated",
    )))
}
