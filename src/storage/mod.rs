use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号
    async fn create_profile(&self, profile: CreateProfileRequest) -> Result<Profile>;
    // 通过ID获取账号信息
    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>>;
    // 通过用户名获取账号信息
    async fn get_profile_by_username(&self, username: &str) -> Result<Option<Profile>>;
    // 通过邮箱获取账号信息
    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>>;
    // 通过用户名或邮箱获取账号信息
    async fn get_profile_by_username_or_email(&self, identifier: &str) -> Result<Option<Profile>>;
    // 列出账号
    async fn list_profiles_with_pagination(
        &self,
        query: ProfileListQuery,
    ) -> Result<ProfileListResponse>;
    // 更新账号信息
    async fn update_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>>;
    // 删除账号
    async fn delete_profile(&self, id: i64) -> Result<bool>;
    // 更新账号最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计账号总数
    async fn count_profiles(&self) -> Result<u64>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 活动管理方法
    // 创建活动（自动生成入口码，保证在 open 活动中唯一）
    async fn create_event(&self, event: CreateEventRequest) -> Result<Event>;
    // 通过ID获取活动信息
    async fn get_event_by_id(&self, event_id: i64) -> Result<Option<Event>>;
    // 通过入口码获取 open 状态的活动
    async fn get_open_event_by_code(&self, entry_code: &str) -> Result<Option<Event>>;
    // 列出活动
    async fn list_events_with_pagination(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse>;
    // 更新活动信息（状态转换合法性由服务层校验）
    async fn update_event(
        &self,
        event_id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<Event>>;
    // 重新生成活动入口码
    async fn reset_entry_code(&self, event_id: i64) -> Result<Option<Event>>;
    // 删除活动（级联删除其反馈）
    async fn delete_event(&self, event_id: i64) -> Result<bool>;

    /// 活动计数器方法
    ///
    /// 计数器只通过原子 UPDATE 修改，保证并发提交下不丢失更新。
    // 指定情感计数与总数各 +1
    async fn increment_event_counters(&self, event_id: i64, tone: Tone) -> Result<()>;
    // 指定情感计数与总数各 -1，任何计数不会低于 0
    async fn decrement_event_counters(&self, event_id: i64, tone: Tone) -> Result<()>;
    // 从 feedback 表重算计数器并写回（对账）
    async fn recount_event_counters(&self, event_id: i64) -> Result<EventCounters>;

    /// 反馈管理方法
    // 创建反馈并同步递增计数器（同一事务）
    async fn create_feedback(&self, event_id: i64, content: &str, tone: Tone) -> Result<Feedback>;
    // 通过ID获取反馈
    async fn get_feedback_by_id(&self, feedback_id: i64) -> Result<Option<Feedback>>;
    // 分页列出活动的反馈
    async fn list_feedback_with_pagination(
        &self,
        event_id: i64,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse>;
    // 获取活动全部反馈内容（统计用）
    async fn list_event_feedback(&self, event_id: i64) -> Result<Vec<Feedback>>;
    // 标记反馈已读/未读
    async fn set_feedback_reviewed(
        &self,
        feedback_id: i64,
        is_reviewed: bool,
    ) -> Result<Option<Feedback>>;
    // 删除反馈并同步递减计数器（同一事务）；反馈不存在返回 false
    async fn delete_feedback(&self, feedback_id: i64) -> Result<bool>;

    /// 系统设置方法
    // 获取单个设置
    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>>;
    // 写入（插入或更新）设置
    async fn upsert_setting(&self, key: &str, value: &str) -> Result<SystemSetting>;
    // 列出全部设置
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
