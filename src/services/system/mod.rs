pub mod settings;
pub mod settings_cache;

pub use settings_cache::DynamicConfig;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::system::requests::UpdateSettingsRequest;
use crate::storage::Storage;

pub struct SystemService {
    storage: Option<Arc<dyn Storage>>,
}

impl SystemService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 列出全部系统设置
    pub async fn list_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::list_settings(self, request).await
    }

    // 获取单个系统设置
    pub async fn get_setting(
        &self,
        request: &HttpRequest,
        key: String,
    ) -> ActixResult<HttpResponse> {
        settings::get_setting(self, request, key).await
    }

    // 批量更新系统设置
    pub async fn update_settings(
        &self,
        request: &HttpRequest,
        update_data: UpdateSettingsRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_settings(self, request, update_data).await
    }
}
