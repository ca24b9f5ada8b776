//! 活动存储操作
//!
//! 四个反馈计数列是唯一被并发写者共享的可变状态，所有修改都必须走
//! 本模块的原子 UPDATE（列自增表达式），不允许读取-修改-写回。

use super::SeaOrmStorage;
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::entity::feedback::{Column as FeedbackColumn, Entity as FeedbackEntity};
use crate::errors::{EvaloError, Result};
use crate::models::{
    PaginationInfo,
    events::{
        entities::{Event, EventCounters, EventStatus},
        requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
        responses::EventListResponse,
    },
    feedback::entities::Tone,
};
use crate::utils::random_code::generate_entry_code;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::warn;

/// 入口码生成的最大尝试次数
///
/// 36^4 ≈ 168 万种组合，同时 open 的活动远小于该量级，
/// 连续 16 次碰撞意味着码空间接近耗尽或随机源异常。
const MAX_CODE_ATTEMPTS: usize = 16;

/// 情感倾向对应的计数列
fn tone_column(tone: Tone) -> Column {
    match tone {
        Tone::Positive => Column::PositiveFeedbackCount,
        Tone::Negative => Column::NegativeFeedbackCount,
        Tone::Neutral => Column::NeutralFeedbackCount,
    }
}

/// 在给定连接上原子递增计数器（可在事务内使用）
///
/// 返回受影响的行数；0 表示活动不存在。
pub(crate) async fn increment_counters_on<C: ConnectionTrait>(
    conn: &C,
    event_id: i64,
    tone: Tone,
) -> Result<u64> {
    use sea_orm::ExprTrait;

    let col = tone_column(tone);
    let now = chrono::Utc::now().timestamp();

    let result = Events::update_many()
        .col_expr(col, Expr::col(col).add(1))
        .col_expr(
            Column::TotalFeedbackCount,
            Expr::col(Column::TotalFeedbackCount).add(1),
        )
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.eq(event_id))
        .exec(conn)
        .await
        .map_err(|e| EvaloError::database_operation(format!("递增反馈计数失败: {e}")))?;

    Ok(result.rows_affected)
}

/// 在给定连接上原子递减计数器（可在事务内使用）
///
/// UPDATE 带 `计数 > 0` 过滤条件：计数已为 0 时不命中任何行，
/// 计数器保持不变（钳制在 0，容忍重复删除）。
/// 返回受影响的行数。
pub(crate) async fn decrement_counters_on<C: ConnectionTrait>(
    conn: &C,
    event_id: i64,
    tone: Tone,
) -> Result<u64> {
    use sea_orm::ExprTrait;

    let col = tone_column(tone);
    let now = chrono::Utc::now().timestamp();

    let result = Events::update_many()
        .col_expr(col, Expr::col(col).sub(1))
        .col_expr(
            Column::TotalFeedbackCount,
            Expr::col(Column::TotalFeedbackCount).sub(1),
        )
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.eq(event_id))
        .filter(col.gt(0))
        .filter(Column::TotalFeedbackCount.gt(0))
        .exec(conn)
        .await
        .map_err(|e| EvaloError::database_operation(format!("递减反馈计数失败: {e}")))?;

    Ok(result.rows_affected)
}

impl SeaOrmStorage {
    /// 创建活动（生成在 open 活动中唯一的入口码）
    pub async fn create_event_impl(&self, req: CreateEventRequest) -> Result<Event> {
        let now = chrono::Utc::now().timestamp();
        let entry_code = self.draw_unique_entry_code().await?;

        let model = ActiveModel {
            course_id: Set(req.course_id),
            event_date: Set(req.event_date.timestamp()),
            status: Set(EventStatus::Open.to_string()),
            entry_code: Set(entry_code),
            positive_feedback_count: Set(0),
            negative_feedback_count: Set(0),
            neutral_feedback_count: Set(0),
            total_feedback_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_event())
    }

    /// 抽取一个与所有 open 活动都不冲突的入口码
    ///
    /// 活动关闭后其入口码即可被复用，因此只需要与 open 活动查重。
    async fn draw_unique_entry_code(&self) -> Result<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_entry_code();
            if self.get_open_event_by_code_impl(&code).await?.is_none() {
                return Ok(code);
            }
        }
        Err(EvaloError::entry_code_exhausted(format!(
            "连续 {MAX_CODE_ATTEMPTS} 次生成入口码均冲突"
        )))
    }

    /// 通过 ID 获取活动
    pub async fn get_event_by_id_impl(&self, event_id: i64) -> Result<Option<Event>> {
        let result = Events::find_by_id(event_id)
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 通过入口码获取 open 状态的活动
    ///
    /// 只在 open 活动中解析：关闭或归档活动的码视为无效。
    pub async fn get_open_event_by_code_impl(&self, entry_code: &str) -> Result<Option<Event>> {
        let result = Events::find()
            .filter(Column::EntryCode.eq(entry_code))
            .filter(Column::Status.eq(EventStatus::Open.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 分页列出活动
    pub async fn list_events_with_pagination_impl(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Events::find();

        // 课程筛选
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 排序
        select = select.order_by_desc(Column::EventDate);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询活动总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询活动页数失败: {e}")))?;

        let events = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(EventListResponse {
            items: events.into_iter().map(|m| m.into_event()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新活动信息（状态转换合法性由服务层校验）
    pub async fn update_event_impl(
        &self,
        event_id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<Event>> {
        // 先检查活动是否存在
        let existing = self.get_event_by_id_impl(event_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(event_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(event_date) = update.event_date {
            model.event_date = Set(event_date.timestamp());
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("更新活动失败: {e}")))?;

        self.get_event_by_id_impl(event_id).await
    }

    /// 重新生成活动入口码
    pub async fn reset_entry_code_impl(&self, event_id: i64) -> Result<Option<Event>> {
        let existing = self.get_event_by_id_impl(event_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let entry_code = self.draw_unique_entry_code().await?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(event_id),
            entry_code: Set(entry_code),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("重置入口码失败: {e}")))?;

        self.get_event_by_id_impl(event_id).await
    }

    /// 删除活动（外键级联删除其全部反馈）
    pub async fn delete_event_impl(&self, event_id: i64) -> Result<bool> {
        let result = Events::delete_by_id(event_id)
            .exec(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 原子递增活动计数器
    pub async fn increment_event_counters_impl(&self, event_id: i64, tone: Tone) -> Result<()> {
        let rows = increment_counters_on(&self.db, event_id, tone).await?;
        if rows == 0 {
            return Err(EvaloError::not_found(format!("活动不存在: {event_id}")));
        }
        Ok(())
    }

    /// 原子递减活动计数器（钳制在 0）
    pub async fn decrement_event_counters_impl(&self, event_id: i64, tone: Tone) -> Result<()> {
        let rows = decrement_counters_on(&self.db, event_id, tone).await?;
        if rows == 0 {
            // 没有命中行：要么活动不存在，要么计数已为 0（钳制生效）
            if self.get_event_by_id_impl(event_id).await?.is_none() {
                return Err(EvaloError::not_found(format!("活动不存在: {event_id}")));
            }
            warn!(
                "Decrement on event {} skipped: {} counter already at zero",
                event_id, tone
            );
        }
        Ok(())
    }

    /// 从 feedback 表重算计数器并写回（对账）
    pub async fn recount_event_counters_impl(&self, event_id: i64) -> Result<EventCounters> {
        if self.get_event_by_id_impl(event_id).await?.is_none() {
            return Err(EvaloError::not_found(format!("活动不存在: {event_id}")));
        }

        let count_tone = |tone: Tone| {
            FeedbackEntity::find()
                .filter(FeedbackColumn::EventId.eq(event_id))
                .filter(FeedbackColumn::Tone.eq(tone.to_string()))
                .count(&self.db)
        };

        let positive = count_tone(Tone::Positive)
            .await
            .map_err(|e| EvaloError::database_operation(format!("统计正面反馈失败: {e}")))?
            as i32;
        let negative = count_tone(Tone::Negative)
            .await
            .map_err(|e| EvaloError::database_operation(format!("统计负面反馈失败: {e}")))?
            as i32;
        let neutral = count_tone(Tone::Neutral)
            .await
            .map_err(|e| EvaloError::database_operation(format!("统计中性反馈失败: {e}")))?
            as i32;

        let counters = EventCounters {
            positive_feedback_count: positive,
            negative_feedback_count: negative,
            neutral_feedback_count: neutral,
            total_feedback_count: positive + negative + neutral,
        };

        let now = chrono::Utc::now().timestamp();
        Events::update_many()
            .col_expr(Column::PositiveFeedbackCount, Expr::value(positive))
            .col_expr(Column::NegativeFeedbackCount, Expr::value(negative))
            .col_expr(Column::NeutralFeedbackCount, Expr::value(neutral))
            .col_expr(
                Column::TotalFeedbackCount,
                Expr::value(counters.total_feedback_count),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(event_id))
            .exec(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("写回计数器失败: {e}")))?;

        Ok(counters)
    }
}
