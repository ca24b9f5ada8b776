//! 缓存层
//!
//! 通过插件注册表支持多种缓存后端（Moka 内存缓存 / Redis），
//! 后端在编译期通过 `declare_object_cache_plugin!` 宏自注册。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};
