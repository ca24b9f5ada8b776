//! 反馈实体
//!
//! 匿名设计：不包含任何指向提交者的外键或标识。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub content: String,
    pub tone: String,
    pub is_reviewed: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_feedback(self) -> crate::models::feedback::entities::Feedback {
        use crate::models::feedback::entities::{Feedback, Tone};
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        Feedback {
            id: self.id,
            event_id: self.event_id,
            content: self.content,
            tone: Tone::from_str(&self.tone).unwrap_or(Tone::Neutral),
            is_reviewed: self.is_reviewed,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
