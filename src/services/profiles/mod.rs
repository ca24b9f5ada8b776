pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::profiles::requests::{
    CreateProfileRequest, ProfileQueryParams, UpdateProfileRequest,
};
use crate::storage::Storage;

pub struct ProfileService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfileService {
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

    // 获取账号列表
    pub async fn list_profiles(
        &self,
        request: &HttpRequest,
        query: ProfileQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_profiles(self, request, query).await
    }

    // 创建账号（教师管理页）
    pub async fn create_profile(
        &self,
        request: &HttpRequest,
        profile_data: CreateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_profile(self, request, profile_data).await
    }

    // 根据账号 ID 获取账号信息
    pub async fn get_profile(
        &self,
        request: &HttpRequest,
        profile_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_profile(self, request, profile_id).await
    }

    // 更新账号信息
    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        profile_id: i64,
        update_data: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_profile(self, request, profile_id, update_data).await
    }

    // 删除账号
    pub async fn delete_profile(
        &self,
        request: &HttpRequest,
        profile_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_profile(self, request, profile_id).await
    }
}
