// ==========================================
// 焊接检验记录系统 - 焊口记录API
// ==========================================
// 职责: 封装焊口记录 CRUD（分页/搜索/日期过滤）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::weld::WeldRecord;
use crate::repository::{WeldListFilter, WeldRepository};
use std::sync::Arc;

pub struct WeldApi {
    repo: Arc<WeldRepository>,
}

impl WeldApi {
    /// 创建新的 WeldApi 实例
    pub fn new(db_path: &str) -> ApiResult<Self> {
        let repo = WeldRepository::new(db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            repo: Arc::new(repo),
        })
    }

    /// 分页列表（date DESC, 录入时间倒序）
    pub async fn list(&self, filter: WeldListFilter) -> ApiResult<Vec<WeldRecord>> {
        Ok(self.repo.list(&filter)?)
    }

    /// 按 ID 查询
    pub async fn get(&self, id: i64) -> ApiResult<WeldRecord> {
        Ok(self.repo.get(id)?)
    }

    /// 创建焊口记录
    pub async fn create(&self, record: WeldRecord) -> ApiResult<WeldRecord> {
        Ok(self.repo.insert(&record)?)
    }

    /// 更新焊口记录
    pub async fn update(&self, id: i64, record: WeldRecord) -> ApiResult<WeldRecord> {
        Ok(self.repo.update(id, &record)?)
    }

    /// 删除焊口记录
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        Ok(self.repo.delete(id)?)
    }
}
