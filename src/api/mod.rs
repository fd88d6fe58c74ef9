// ==========================================
// 焊接检验记录系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 处理器调用
// ==========================================

pub mod error;
pub mod field_api;
pub mod upload_api;
pub mod weld_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use field_api::FieldApi;
pub use upload_api::UploadApi;
pub use weld_api::WeldApi;
