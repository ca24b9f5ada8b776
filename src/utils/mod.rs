pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeCourseIdI64, SafeEntryCode, SafeEventIdI64, SafeFeedbackIdI64, SafeProfileIdI64,
    SafeSettingKey,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
