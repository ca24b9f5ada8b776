//! 反馈收集活动实体
//!
//! 四个反冗余计数列与 feedback 表保持一致，只允许通过原子 UPDATE 修改，
//! 不做读取-修改-写回。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub event_date: i64,
    pub status: String,
    pub entry_code: String,
    pub positive_feedback_count: i32,
    pub negative_feedback_count: i32,
    pub neutral_feedback_count: i32,
    pub total_feedback_count: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_event(self) -> crate::models::events::entities::Event {
        use crate::models::events::entities::{Event, EventStatus};
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        Event {
            id: self.id,
            course_id: self.course_id,
            event_date: DateTime::<Utc>::from_timestamp(self.event_date, 0).unwrap_or_default(),
            status: EventStatus::from_str(&self.status).unwrap_or(EventStatus::Archived),
            entry_code: self.entry_code,
            positive_feedback_count: self.positive_feedback_count,
            negative_feedback_count: self.negative_feedback_count,
            neutral_feedback_count: self.neutral_feedback_count,
            total_feedback_count: self.total_feedback_count,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
