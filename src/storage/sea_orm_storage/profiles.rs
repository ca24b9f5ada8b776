//! 账号存储操作

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Column, Entity as Profiles};
use crate::errors::{EvaloError, Result};
use crate::models::{
    PaginationInfo,
    profiles::{
        entities::Profile,
        requests::{CreateProfileRequest, ProfileListQuery, UpdateProfileRequest},
        responses::ProfileListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建账号（password 字段应为已哈希值，哈希由服务层完成）
    pub async fn create_profile_impl(&self, req: CreateProfileRequest) -> Result<Profile> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(crate::models::profiles::entities::ProfileStatus::Active.to_string()),
            display_name: Set(req.display_name),
            avatar_url: Set(None),
            department: Set(req.department),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("创建账号失败: {e}")))?;

        Ok(result.into_profile())
    }

    /// 通过 ID 获取账号
    pub async fn get_profile_by_id_impl(&self, id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 通过用户名获取账号
    pub async fn get_profile_by_username_impl(&self, username: &str) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 通过邮箱获取账号
    pub async fn get_profile_by_email_impl(&self, email: &str) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 通过用户名或邮箱获取账号（登录用）
    pub async fn get_profile_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 分页列出账号
    pub async fn list_profiles_with_pagination_impl(
        &self,
        query: ProfileListQuery,
    ) -> Result<ProfileListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Profiles::find();

        // 角色筛选
        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 搜索条件：用户名或显示名
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询账号总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询账号页数失败: {e}")))?;

        let profiles = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询账号列表失败: {e}")))?;

        Ok(ProfileListResponse {
            items: profiles.into_iter().map(|m| m.into_profile()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新账号信息
    pub async fn update_profile_impl(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        // 先检查账号是否存在
        let existing = self.get_profile_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        // password 字段应为已哈希值
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }

        if let Some(avatar_url) = update.avatar_url {
            model.avatar_url = Set(Some(avatar_url));
        }

        if let Some(department) = update.department {
            model.department = Set(Some(department));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("更新账号失败: {e}")))?;

        self.get_profile_by_id_impl(id).await
    }

    /// 删除账号
    pub async fn delete_profile_impl(&self, id: i64) -> Result<bool> {
        let result = Profiles::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("删除账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Profiles::update_many()
            .col_expr(Column::LastLogin, Expr::value(Some(now)))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计账号总数
    pub async fn count_profiles_impl(&self) -> Result<u64> {
        Profiles::find()
            .count(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("统计账号总数失败: {e}")))
    }
}
