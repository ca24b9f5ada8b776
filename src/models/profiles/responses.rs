use super::entities::Profile;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 账号列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ProfileListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Profile>,
}
