use crate::models::common::PaginationQuery;
use crate::models::profiles::entities::{ProfileRole, ProfileStatus};
use serde::Deserialize;
use ts_rs::TS;

// 账号查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ProfileQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<ProfileRole>,
    pub search: Option<String>,
}

// 创建账号请求（院长/管理员创建教师账号）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct CreateProfileRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: ProfileRole,
    pub display_name: Option<String>,
    pub department: Option<String>,
}

// 更新账号请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<ProfileRole>,
    pub status: Option<ProfileStatus>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
}

// 账号列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ProfileListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<ProfileRole>,
    pub search: Option<String>,
}
