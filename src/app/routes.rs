// ==========================================
// 焊接检验记录系统 - HTTP 路由与处理器
// ==========================================
// 职责: REST 接口，连接传输层与 API 层
// 约定:
// - 错误一律 { "error": "..." }，状态码由 ApiError 映射
// - /api/fields/reorder 先于 /api/fields/{id} 注册，避免被参数路由遮蔽
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::domain::field::{FieldDefinition, FieldOrderUpdate};
use crate::domain::weld::{ImportReport, WeldRecord};
use crate::repository::WeldListFilter;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 构建应用路由
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        // 焊口记录 CRUD
        .route("/api/welds", get(list_welds).post(create_weld))
        .route(
            "/api/welds/{id}",
            get(get_weld).put(update_weld).delete(delete_weld),
        )
        // 字段定义 CRUD + 重排
        .route("/api/fields", get(list_fields).post(create_field))
        .route("/api/fields/reorder", put(reorder_fields))
        .route(
            "/api/fields/{id}",
            get(get_field).put(update_field).delete(delete_field),
        )
        // CSV 导入导出
        .route("/api/upload/csv", post(upload_csv))
        .route("/api/upload/export", get(export_csv))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ==========================================
// 健康检查
// ==========================================

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "message": "Welding Log Backend Running"
    }))
}

// ==========================================
// CSV 导入导出
// ==========================================

async fn upload_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportReport>> {
    // 取 multipart 中名为 file 的部分
    let mut data: Option<axum::body::Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("multipart 解析失败: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::ImportFailure(format!("读取上传内容失败: {}", e)))?;
            data = Some(bytes);
            break;
        }
    }

    let data = data.ok_or_else(|| ApiError::InvalidInput("No file uploaded".to_string()))?;
    let report = state.upload_api.import_csv(&data).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    date_from: Option<String>,
    date_to: Option<String>,
}

async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let export = state
        .upload_api
        .export_csv(query.date_from.as_deref(), query.date_to.as_deref())
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", export.filename),
            ),
        ],
        export.body,
    ))
}

// ==========================================
// 焊口记录 CRUD
// ==========================================

#[derive(Debug, Deserialize)]
struct WeldListQuery {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,
}

async fn list_welds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeldListQuery>,
) -> ApiResult<Json<Vec<WeldRecord>>> {
    let filter = WeldListFilter {
        search: query.search,
        date_from: query.date_from,
        date_to: query.date_to,
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(50),
    };
    let welds = state.weld_api.list(filter).await?;
    Ok(Json(welds))
}

async fn get_weld(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<WeldRecord>> {
    let weld = state.weld_api.get(id).await?;
    Ok(Json(weld))
}

async fn create_weld(
    State(state): State<Arc<AppState>>,
    Json(record): Json<WeldRecord>,
) -> ApiResult<impl IntoResponse> {
    let created = state.weld_api.create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_weld(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(record): Json<WeldRecord>,
) -> ApiResult<Json<WeldRecord>> {
    let updated = state.weld_api.update(id, record).await?;
    Ok(Json(updated))
}

async fn delete_weld(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.weld_api.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Weld deleted successfully"
    })))
}

// ==========================================
// 字段定义 CRUD + 重排
// ==========================================

async fn list_fields(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<FieldDefinition>>> {
    let fields = state.field_api.list().await?;
    Ok(Json(fields))
}

async fn get_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FieldDefinition>> {
    let field = state.field_api.get(id).await?;
    Ok(Json(field))
}

async fn create_field(
    State(state): State<Arc<AppState>>,
    Json(field): Json<FieldDefinition>,
) -> ApiResult<impl IntoResponse> {
    let created = state.field_api.create(field).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(field): Json<FieldDefinition>,
) -> ApiResult<Json<FieldDefinition>> {
    let updated = state.field_api.update(id, field).await?;
    Ok(Json(updated))
}

async fn delete_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    state.field_api.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Field deleted successfully"
    })))
}

#[derive(Debug, Deserialize)]
struct ReorderRequest {
    #[serde(rename = "fieldOrders")]
    field_orders: Vec<FieldOrderUpdate>,
}

async fn reorder_fields(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReorderRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    state.field_api.reorder(request.field_orders).await?;
    Ok(Json(serde_json::json!({
        "message": "Fields reordered successfully"
    })))
}
