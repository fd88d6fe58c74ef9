// ==========================================
// 焊接检验记录系统 - 字段定义领域模型
// ==========================================
// 对齐: field_definitions 表
// 用途: 用户自定义表单字段的元数据（表单渲染层消费）
// 红线: CSV 导入导出管道不消费此模型（固定 19 列词表）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// FieldType - 字段类型枚举
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    Select,
}

impl FieldType {
    /// 数据库存储格式（小写字符串）
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
        }
    }

    /// 从存储格式解析；未知值回退为 text
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "textarea" => FieldType::Textarea,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "select" => FieldType::Select,
            _ => FieldType::Text,
        }
    }
}

// ==========================================
// FieldDefinition - 字段定义实体
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// 存储分配的主键（创建前为 None）
    pub id: Option<i64>,

    /// 逻辑字段名（唯一、不可变；对应存储列或 custom_fields 键）
    pub field_name: String,
    /// 人类可读标签
    pub display_name: String,
    /// 字段类型
    pub field_type: FieldType,
    /// 是否必填（表单层校验口径，导入管道不消费）
    #[serde(default)]
    pub is_required: bool,
    /// 是否可编辑
    #[serde(default = "default_is_editable")]
    pub is_editable: bool,
    /// 显示顺序；重排后保持 0..N-1 稠密序列（同值按 id 破平）
    #[serde(default)]
    pub field_order: i64,
    /// 校验规则（JSON，表单层消费）
    pub validation_rules: Option<serde_json::Value>,

    // ===== 审计字段（存储层写入）=====
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_is_editable() -> bool {
    true
}

// ==========================================
// FieldOrderUpdate - 批量重排请求项
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOrderUpdate {
    pub id: i64,
    pub order: i64,
}
