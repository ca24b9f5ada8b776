//! 安全路径参数提取器
//!
//! 在进入处理程序之前完成路径参数的解析与校验，
//! 非法参数直接返回 400，避免在每个处理程序里重复解析逻辑。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::normalize_entry_code;

fn bad_request(code: ErrorCode, message: &str) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        message.to_string(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message)),
    )
    .into()
}

/// 定义 i64 主键路径提取器的宏
///
/// 提取指定名称的路径参数，要求为正整数。
macro_rules! define_safe_id_extractor {
    ($(
        $name:ident($param:literal, $message:literal)
    ),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    let parsed = req
                        .match_info()
                        .get($param)
                        .and_then(|raw| raw.parse::<i64>().ok())
                        .filter(|id| *id > 0);

                    ready(match parsed {
                        Some(id) => Ok($name(id)),
                        None => Err(bad_request(ErrorCode::BadRequest, $message)),
                    })
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeProfileIdI64("profile_id", "Invalid profile id"),
    SafeCourseIdI64("course_id", "Invalid course id"),
    SafeEventIdI64("event_id", "Invalid event id"),
    SafeFeedbackIdI64("feedback_id", "Invalid feedback id"),
}

/// 入口码路径提取器：大小写不敏感，规范化为大写
#[derive(Debug, Clone)]
pub struct SafeEntryCode(pub String);

impl FromRequest for SafeEntryCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let normalized = req
            .match_info()
            .get("code")
            .ok_or("missing entry code")
            .and_then(|raw| normalize_entry_code(raw));

        ready(match normalized {
            Ok(code) => Ok(SafeEntryCode(code)),
            Err(_) => Err(bad_request(
                ErrorCode::EntryCodeInvalid,
                "Entry code must be exactly 4 letters or digits",
            )),
        })
    }
}

/// 设置键路径提取器
#[derive(Debug, Clone)]
pub struct SafeSettingKey(pub String);

impl FromRequest for SafeSettingKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let key = req.match_info().get("key").map(|k| k.to_string()).filter(|k| {
            !k.is_empty()
                && k.len() <= 128
                && k.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        });

        ready(match key {
            Some(key) => Ok(SafeSettingKey(key)),
            None => Err(bad_request(ErrorCode::BadRequest, "Invalid setting key")),
        })
    }
}
