//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod events;
mod feedback;
mod profiles;
mod system_settings;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{EvaloError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EvaloError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 创建内存 SQLite 存储（仅用于测试）
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        // 内存库限制单连接，多连接会各自打开独立的空库
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| EvaloError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| EvaloError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EvaloError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EvaloError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EvaloError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EvaloError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    events::{
        entities::{Event, EventCounters},
        requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
        responses::EventListResponse,
    },
    feedback::{
        entities::{Feedback, Tone},
        requests::FeedbackListQuery,
        responses::FeedbackListResponse,
    },
    profiles::{
        entities::Profile,
        requests::{CreateProfileRequest, ProfileListQuery, UpdateProfileRequest},
        responses::ProfileListResponse,
    },
    system::entities::SystemSetting,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_profile(&self, profile: CreateProfileRequest) -> Result<Profile> {
        self.create_profile_impl(profile).await
    }

    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>> {
        self.get_profile_by_id_impl(id).await
    }

    async fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>> {
        self.get_profile_by_username_impl(username).await
    }

    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>> {
        self.get_profile_by_email_impl(email).await
    }

    async fn get_profile_by_username_or_email(&self, identifier: &str) -> Result<Option<Profile>> {
        self.get_profile_by_username_or_email_impl(identifier).await
    }

    async fn list_profiles_with_pagination(
        &self,
        query: ProfileListQuery,
    ) -> Result<ProfileListResponse> {
        self.list_profiles_with_pagination_impl(query).await
    }

    async fn update_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        self.update_profile_impl(id, update).await
    }

    async fn delete_profile(&self, id: i64) -> Result<bool> {
        self.delete_profile_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_profiles(&self) -> Result<u64> {
        self.count_profiles_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 活动模块
    async fn create_event(&self, event: CreateEventRequest) -> Result<Event> {
        self.create_event_impl(event).await
    }

    async fn get_event_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        self.get_event_by_id_impl(event_id).await
    }

    async fn get_open_event_by_code(&self, entry_code: &str) -> Result<Option<Event>> {
        self.get_open_event_by_code_impl(entry_code).await
    }

    async fn list_events_with_pagination(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        self.list_events_with_pagination_impl(query).await
    }

    async fn update_event(
        &self,
        event_id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<Event>> {
        self.update_event_impl(event_id, update).await
    }

    async fn reset_entry_code(&self, event_id: i64) -> Result<Option<Event>> {
        self.reset_entry_code_impl(event_id).await
    }

    async fn delete_event(&self, event_id: i64) -> Result<bool> {
        self.delete_event_impl(event_id).await
    }

    // 计数器模块
    async fn increment_event_counters(&self, event_id: i64, tone: Tone) -> Result<()> {
        self.increment_event_counters_impl(event_id, tone).await
    }

    async fn decrement_event_counters(&self, event_id: i64, tone: Tone) -> Result<()> {
        self.decrement_event_counters_impl(event_id, tone).await
    }

    async fn recount_event_counters(&self, event_id: i64) -> Result<EventCounters> {
        self.recount_event_counters_impl(event_id).await
    }

    // 反馈模块
    async fn create_feedback(&self, event_id: i64, content: &str, tone: Tone) -> Result<Feedback> {
        self.create_feedback_impl(event_id, content, tone).await
    }

    async fn get_feedback_by_id(&self, feedback_id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_id_impl(feedback_id).await
    }

    async fn list_feedback_with_pagination(
        &self,
        event_id: i64,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse> {
        self.list_feedback_with_pagination_impl(event_id, query)
            .await
    }

    async fn list_event_feedback(&self, event_id: i64) -> Result<Vec<Feedback>> {
        self.list_event_feedback_impl(event_id).await
    }

    async fn set_feedback_reviewed(
        &self,
        feedback_id: i64,
        is_reviewed: bool,
    ) -> Result<Option<Feedback>> {
        self.set_feedback_reviewed_impl(feedback_id, is_reviewed)
            .await
    }

    async fn delete_feedback(&self, feedback_id: i64) -> Result<bool> {
        self.delete_feedback_impl(feedback_id).await
    }

    // 系统设置模块
    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.get_setting_impl(key).await
    }

    async fn upsert_setting(&self, key: &str, value: &str) -> Result<SystemSetting> {
        self.upsert_setting_impl(key, value).await
    }

    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>> {
        self.list_all_settings_impl().await
    }
}
