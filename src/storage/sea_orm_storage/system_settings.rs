//! 系统设置存储操作

use super::SeaOrmStorage;
use crate::entity::system_settings::{ActiveModel, Column, Entity as SystemSettings};
use crate::errors::{EvaloError, Result};
use crate::models::system::entities::SystemSetting;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 获取单个设置
    pub async fn get_setting_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let result = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询系统设置失败: {e}")))?;

        Ok(result.map(|m| m.into_setting()))
    }

    /// 写入设置（存在则更新，不存在则插入）
    pub async fn upsert_setting_impl(&self, key: &str, value: &str) -> Result<SystemSetting> {
        let now = chrono::Utc::now().timestamp();

        let existing = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询系统设置失败: {e}")))?;

        let model = match existing {
            Some(_) => {
                let model = ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    updated_at: Set(now),
                };
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| EvaloError::database_operation(format!("更新系统设置失败: {e}")))?
            }
            None => {
                let model = ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    updated_at: Set(now),
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| EvaloError::database_operation(format!("写入系统设置失败: {e}")))?
            }
        };

        Ok(model.into_setting())
    }

    /// 列出全部设置
    pub async fn list_all_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let results = SystemSettings::find()
            .order_by_asc(Column::Key)
            .all(&self.db)
            .await
            .map_err(|e| EvaloError::database_operation(format!("查询系统设置失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_setting()).collect())
    }
}
