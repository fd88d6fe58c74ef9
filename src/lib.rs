// ==========================================
// 焊接检验记录系统 - 核心库
// ==========================================
// 技术栈: Axum + Rust + SQLite
// 系统定位: 动态字段驱动的焊口检验记录服务
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 解析与列名映射
pub mod importer;

// 导出层 - CSV 生成
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    FieldDefinition, FieldOrderUpdate, FieldType, ImportReport, RowError, WeldDraft, WeldRecord,
};

// API
pub use api::{ApiError, ApiResult, FieldApi, UploadApi, WeldApi};

// 应用装配
pub use app::{build_router, AppState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "焊接检验记录系统";

// ==========================================
// 预编译检查
// ==========================================
