use serde::Deserialize;
use std::collections::HashMap;
use ts_rs::TS;

// 批量更新系统设置请求（键 -> 新值）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct UpdateSettingsRequest {
    pub settings: HashMap<String, String>,
}
