use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 账号角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub enum ProfileRole {
    Teacher, // 教师
    Dean,    // 院长（可管理教师账号）
    Admin,   // 管理员
}

impl ProfileRole {
    pub const TEACHER: &'static str = "teacher";
    pub const DEAN: &'static str = "dean";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static ProfileRole] {
        &[&Self::Admin]
    }
    pub fn dean_roles() -> &'static [&'static ProfileRole] {
        &[&Self::Dean, &Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static ProfileRole] {
        &[&Self::Teacher, &Self::Dean, &Self::Admin]
    }
}

impl<'de> Deserialize<'de> for ProfileRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            ProfileRole::TEACHER => Ok(ProfileRole::Teacher),
            ProfileRole::DEAN => Ok(ProfileRole::Dean),
            ProfileRole::ADMIN => Ok(ProfileRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的账号角色: '{s}'. 支持的角色: teacher, dean, admin"
            ))),
        }
    }
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileRole::Teacher => write!(f, "{}", ProfileRole::TEACHER),
            ProfileRole::Dean => write!(f, "{}", ProfileRole::DEAN),
            ProfileRole::Admin => write!(f, "{}", ProfileRole::ADMIN),
        }
    }
}

impl std::str::FromStr for ProfileRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(ProfileRole::Teacher),
            "dean" => Ok(ProfileRole::Dean),
            "admin" => Ok(ProfileRole::Admin),
            _ => Err(format!("Invalid profile role: {s}")),
        }
    }
}

// 账号状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub enum ProfileStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for ProfileStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "active" => Ok(ProfileStatus::Active),
            "inactive" => Ok(ProfileStatus::Inactive),
            "suspended" => Ok(ProfileStatus::Suspended),
            _ => Err(serde::de::Error::custom(format!(
                "无效的账号状态: '{s}'. 支持的状态: active, inactive, suspended"
            ))),
        }
    }
}

impl std::fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileStatus::Active => write!(f, "active"),
            ProfileStatus::Inactive => write!(f, "inactive"),
            ProfileStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for ProfileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProfileStatus::Active),
            "inactive" => Ok(ProfileStatus::Inactive),
            "suspended" => Ok(ProfileStatus::Suspended),
            _ => Err(format!("Invalid profile status: {s}")),
        }
    }
}

// 账号实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: ProfileRole,
    pub status: ProfileStatus,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Profile {
    // 生成访问令牌（JWT）
    pub async fn generate_access_token(&self) -> String {
        match crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string()) {
            Ok(token) => token,
            Err(e) => {
                // 如果 JWT 生成失败，返回一个简单的 token（不推荐在生产环境中使用）
                tracing::error!("JWT token 生成失败: {}", e);
                format!(
                    "fallback_token_{}_{}",
                    self.id,
                    chrono::Utc::now().timestamp()
                )
            }
        }
    }

    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}
