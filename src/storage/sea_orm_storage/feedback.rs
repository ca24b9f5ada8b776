//! 反馈存储操作
//!
//! 反馈行的写入/删除与活动计数器的增减必须是同一个逻辑单元：
//! 两者在同一数据库事务内完成，计数更新失败时整体回滚，
//! 不会出现已落库但未计数的反馈。

use super::SeaOrmStorage;
use super::events::{decrement_counters_on, increment_counters_on};
use crate::entity::feedback::{ActiveModel, Column, Entity as FeedbackEntity};
use crate::errors::{EvaloError, Result};
use crate::models::{
    PaginationInfo,
    feedback::{
        entities::{Feedback, Tone},
        requests::FeedbackListQuery,
        responses::FeedbackListResponse,
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 创建反馈并递增活动计数器（同一事务）
    pub async fn create_feedback_impl(
        &self,
        event_id: i64,
        content: &str,
        tone: Tone,
    ) -> Result<Feedback> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvaloError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            event_id: Set(event_id),
            content: Set(content.to_string()),
            tone: Set(tone.to_string()),
            is_reviewed: Set(false),
            created_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| EvaloError::database_operation(format!("创建反馈失败: {e}")))?;

        // 计数更新不命中说明活动行在事务中途消失，回滚反馈写入
        let rows = increment_counters_on(&txn, event_id, tone).await?;
        if rows == 0 {
            return Err(EvaloError::counter_update(format!(
                "活动 {event_id} 不存在，反馈写入已回滚"
            )));
        }

        txn.commit()
            .await
            .map_err(|e| EvaloError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted.into_feedback())
    }

    /// 通过 ID 获取反馈
    pub async fn get_feedback_by_id_impl(&self, feedback_id: i64) -> Result<Option<Feedback>> {
        let result = FeedbackEntity::find_by_id(feedback_id)
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询反馈失败: {e}")))?;

        Ok(result.map(|m| m.into_feedback()))
    }

    /// 分页列出活动的反馈
    pub async fn list_feedback_with_pagination_impl(
        &self,
        event_id: i64,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = FeedbackEntity::find().filter(Column::EventId.eq(event_id));

        // 情感筛选
        if let Some(tone) = query.tone {
            select = select.filter(Column::Tone.eq(tone.to_string()));
        }

        // 已读状态筛选
        if let Some(is_reviewed) = query.is_reviewed {
            select = select.filter(Column::IsReviewed.eq(is_reviewed));
        }

        // 排序：最新提交在前
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询反馈总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询反馈页数失败: {e}")))?;

        let feedback = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询反馈列表失败: {e}")))?;

        Ok(FeedbackListResponse {
            items: feedback.into_iter().map(|m| m.into_feedback()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 获取活动全部反馈（统计用，不分页）
    pub async fn list_event_feedback_impl(&self, event_id: i64) -> Result<Vec<Feedback>> {
        let results = FeedbackEntity::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询反馈失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_feedback()).collect())
    }

    /// 标记反馈已读/未读
    pub async fn set_feedback_reviewed_impl(
        &self,
        feedback_id: i64,
        is_reviewed: bool,
    ) -> Result<Option<Feedback>> {
        let result = FeedbackEntity::update_many()
            .col_expr(Column::IsReviewed, Expr::value(is_reviewed))
            .filter(Column::Id.eq(feedback_id))
            .exec(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("更新反馈状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_feedback_by_id_impl(feedback_id).await
    }

    /// 删除反馈并递减活动计数器（同一事务）
    ///
    /// 反馈不存在时返回 false，计数器保持不变，
    /// 因此对同一 ID 的重复删除是安全的。
    pub async fn delete_feedback_impl(&self, feedback_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvaloError::database_operation(format!("开启事务失败: {e}")))?;

        // 事务内读取，拿到所属活动和情感倾向
        let existing = FeedbackEntity::find_by_id(feedback_id)
            .one(&txn)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询反馈失败: {e}")))?;

        let Some(feedback) = existing else {
            return Ok(false);
        };

        let event_id = feedback.event_id;
        let tone: Tone = feedback.tone.parse().unwrap_or(Tone::Neutral);

        FeedbackEntity::delete_by_id(feedback_id)
            .exec(&txn)
            .await
            .map_err(|e| EvaloError::database_operation(format!("删除反馈失败: {e}")))?;

        // 计数已为 0 时不命中（钳制），只记录不中断删除
        let rows = decrement_counters_on(&txn, event_id, tone).await?;
        if rows == 0 {
            warn!(
                "Feedback {} deleted but event {} {} counter was already at zero",
                feedback_id, event_id, tone
            );
        }

        txn.commit()
            .await
            .map_err(|e| EvaloError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }
}
