// ==========================================
// 焊接检验记录系统 - 字段定义API
// ==========================================
// 职责: 封装字段定义 CRUD + 批量重排
// 说明: 与 CSV 管道解耦 —— 此处登记的自定义字段只驱动表单渲染，
//       不进入导入导出的固定 19 列词表
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::field::{FieldDefinition, FieldOrderUpdate};
use crate::repository::FieldDefinitionRepository;
use std::sync::Arc;

pub struct FieldApi {
    repo: Arc<FieldDefinitionRepository>,
}

impl FieldApi {
    /// 创建新的 FieldApi 实例
    pub fn new(db_path: &str) -> ApiResult<Self> {
        let repo = FieldDefinitionRepository::new(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            repo: Arc::new(repo),
        })
    }

    /// 列出全部字段定义（field_order ASC）
    pub async fn list(&self) -> ApiResult<Vec<FieldDefinition>> {
        Ok(self.repo.list()?)
    }

    /// 按 ID 查询
    pub async fn get(&self, id: i64) -> ApiResult<FieldDefinition> {
        Ok(self.repo.get(id)?)
    }

    /// 创建字段定义
    pub async fn create(&self, field: FieldDefinition) -> ApiResult<FieldDefinition> {
        if field.field_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("field_name 不能为空".to_string()));
        }
        Ok(self.repo.create(&field)?)
    }

    /// 更新字段定义
    pub async fn update(&self, id: i64, field: FieldDefinition) -> ApiResult<FieldDefinition> {
        Ok(self.repo.update(id, &field)?)
    }

    /// 删除字段定义
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        Ok(self.repo.delete(id)?)
    }

    /// 批量重排（单事务；完成后 field_order 为 0..N-1 稠密序列）
    pub async fn reorder(&self, updates: Vec<FieldOrderUpdate>) -> ApiResult<()> {
        if updates.is_empty() {
            return Err(ApiError::InvalidInput("fieldOrders 不能为空".to_string()));
        }
        Ok(self.repo.reorder(&updates)?)
    }
}
