pub mod auth;
pub mod common;
pub mod courses;
pub mod events;
pub mod feedback;
pub mod profiles;
pub mod system;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

// 应用启动时间，用于 /system/status 的运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
