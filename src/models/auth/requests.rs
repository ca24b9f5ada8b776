use serde::Deserialize;
use ts_rs::TS;

// 登录请求（username 字段同时接受用户名或邮箱）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}
