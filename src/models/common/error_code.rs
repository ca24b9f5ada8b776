//! 业务错误码定义
//!
//! 错误码分段：
//! - 0: 成功
//! - 400xx: 请求参数/业务校验错误
//! - 401xx: 认证错误
//! - 403xx: 权限错误
//! - 404xx: 资源不存在
//! - 409xx: 资源冲突
//! - 429xx: 速率限制
//! - 500xx: 服务端错误
//! - 503xx: 外部依赖不可用

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    EntryCodeInvalid = 40010,
    ContentInvalid = 40011,
    EventStatusInvalid = 40012,
    ProfileNameInvalid = 40020,
    ProfileEmailInvalid = 40021,
    ProfilePasswordInvalid = 40022,

    Unauthorized = 40100,
    AuthFailed = 40101,

    Forbidden = 40300,
    CoursePermissionDenied = 40310,

    NotFound = 40400,
    ProfileNotFound = 40410,
    CourseNotFound = 40420,
    EventNotFound = 40430,
    FeedbackNotFound = 40440,
    SettingNotFound = 40450,

    ProfileAlreadyExists = 40910,
    CannotDeleteCurrentProfile = 40911,

    RateLimitExceeded = 42900,

    InternalServerError = 50000,
    CounterUpdateFailed = 50010,
    EntryCodeGenerationFailed = 50011,

    ClassificationUnavailable = 50310,
}
