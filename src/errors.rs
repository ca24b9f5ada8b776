//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_evalo_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EvaloError {
            $($variant(String),)*
        }

        impl EvaloError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EvaloError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EvaloError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EvaloError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EvaloError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EvaloError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_evalo_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    EntryCodeInvalid("E012", "Entry Code Invalid"),
    EntryCodeExhausted("E013", "Entry Code Space Exhausted"),
    ClassificationUnavailable("E014", "Sentiment Classification Unavailable"),
    CounterUpdate("E015", "Feedback Counter Update Error"),
}

impl EvaloError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EvaloError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EvaloError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EvaloError {
    fn from(err: sea_orm::DbErr) -> Self {
        EvaloError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EvaloError {
    fn from(err: serde_json::Error) -> Self {
        EvaloError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EvaloError {
    fn from(err: chrono::ParseError) -> Self {
        EvaloError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for EvaloError {
    fn from(err: reqwest::Error) -> Self {
        EvaloError::ClassificationUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvaloError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EvaloError::cache_connection("test").code(), "E001");
        assert_eq!(EvaloError::database_config("test").code(), "E003");
        assert_eq!(EvaloError::validation("test").code(), "E006");
        assert_eq!(EvaloError::entry_code_invalid("test").code(), "E012");
        assert_eq!(EvaloError::classification_unavailable("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EvaloError::entry_code_invalid("test").error_type(),
            "Entry Code Invalid"
        );
        assert_eq!(
            EvaloError::counter_update("test").error_type(),
            "Feedback Counter Update Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EvaloError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = EvaloError::not_found("Event 42 does not exist");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Event 42"));
    }
}
