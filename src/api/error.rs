// ==========================================
// 焊接检验记录系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户可见的错误消息
// 说明: 对外 JSON 形如 { "error": "..." }；状态码按错误类别映射
// ==========================================

use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 业务规则错误 =====
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    // ===== 导入导出错误 =====
    /// 流级导入失败（文件不可读/CSV 解析失败），整体中止
    #[error("文件导入失败: {0}")]
    ImportFailure(String),

    // ===== 数据访问错误 =====
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 从下层错误转换
// 目的: 将技术错误转换为用户可见的业务错误
// ==========================================

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, .. } => {
                ApiError::NotFound(format!("{} not found", entity))
            }
            RepositoryError::DatabaseConnectionError(msg) => {
                ApiError::DatabaseConnectionError(msg)
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailure(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            // 导出零匹配: 对外固定文案（与历史接口位级兼容）
            ExportError::NoData => ApiError::NotFound("No data found for export".to_string()),
            ExportError::Repository(e) => e.into(),
        }
    }
}

// ==========================================
// HTTP 映射
// ==========================================

impl ApiError {
    /// 错误类别 → HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_maps_to_404() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Weld".to_string(),
            id: "7".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Weld not found");
    }

    #[test]
    fn test_export_no_data_maps_to_404_with_fixed_message() {
        let err: ApiError = ExportError::NoData.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "No data found for export");
    }

    #[test]
    fn test_stream_failure_maps_to_500() {
        let err: ApiError = ImportError::CsvParseError("bad quoting".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err = ApiError::InvalidInput("No file uploaded".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
