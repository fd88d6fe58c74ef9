// ==========================================
// 焊接检验记录系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、导入中间结构
// 红线: 不含数据访问逻辑,不含管道逻辑
// ==========================================

pub mod field;
pub mod weld;

// 重导出核心类型
pub use field::{FieldDefinition, FieldOrderUpdate, FieldType};
pub use weld::{ImportReport, RowError, WeldDraft, WeldRecord};
