use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::profiles::entities::ProfileRole;
use crate::models::profiles::requests::{
    CreateProfileRequest, ProfileQueryParams, UpdateProfileRequest,
};
use crate::services::ProfileService;
use crate::utils::SafeProfileIdI64;

// 懒加载的全局 PROFILE_SERVICE 实例
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

// HTTP处理程序
pub async fn list_profiles(
    req: HttpRequest,
    query: web::Query<ProfileQueryParams>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.list_profiles(&req, query.into_inner()).await
}

pub async fn create_profile(
    req: HttpRequest,
    profile_data: web::Json<CreateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .create_profile(&req, profile_data.into_inner())
        .await
}

pub async fn get_profile(
    req: HttpRequest,
    profile_id: SafeProfileIdI64,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.get_profile(&req, profile_id.0).await
}

pub async fn update_profile(
    req: HttpRequest,
    profile_id: SafeProfileIdI64,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .update_profile(&req, profile_id.0, update_data.into_inner())
        .await
}

pub async fn delete_profile(
    req: HttpRequest,
    profile_id: SafeProfileIdI64,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.delete_profile(&req, profile_id.0).await
}

// 配置路由
pub fn configure_profiles_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profiles")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        // 教师管理页：仅院长/管理员可列出账号
                        web::get()
                            .to(list_profiles)
                            .wrap(middlewares::RequireRole::new_any(ProfileRole::dean_roles())),
                    )
                    .route(
                        // 院长/管理员创建教师账号
                        web::post()
                            .to(create_profile)
                            .wrap(middlewares::RequireRole::new_any(ProfileRole::dean_roles())),
                    ),
            )
            .service(
                web::resource("/{profile_id}")
                    .route(
                        web::get()
                            .to(get_profile)
                            .wrap(middlewares::RequireRole::new_any(ProfileRole::dean_roles())),
                    )
                    // 教师可更新自己的资料，角色/状态变更在服务层限制为院长
                    .route(web::put().to(update_profile))
                    .route(
                        web::delete()
                            .to(delete_profile)
                            .wrap(middlewares::RequireRole::new_any(ProfileRole::dean_roles())),
                    ),
            ),
    );
}
