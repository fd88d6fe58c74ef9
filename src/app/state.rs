// ==========================================
// 焊接检验记录系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use crate::api::{ApiResult, FieldApi, UploadApi, WeldApi};
use std::path::PathBuf;
use std::sync::Arc;

/// 应用状态
///
/// 包含所有API实例和共享资源，作为 axum Router 的全局状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 焊口记录API
    pub weld_api: Arc<WeldApi>,

    /// 字段定义API
    pub field_api: Arc<FieldApi>,

    /// CSV 导入导出API
    pub upload_api: Arc<UploadApi>,
}

impl AppState {
    /// 创建新的应用状态
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - upload_dir: CSV 上传临时目录
    pub fn new(db_path: String, upload_dir: PathBuf) -> ApiResult<Self> {
        let weld_api = Arc::new(WeldApi::new(&db_path)?);
        let field_api = Arc::new(FieldApi::new(&db_path)?);
        let upload_api = Arc::new(UploadApi::new(&db_path, upload_dir)?);

        Ok(Self {
            db_path,
            weld_api,
            field_api,
            upload_api,
        })
    }
}
