// ==========================================
// 焊接检验记录系统 - 焊口领域模型
// ==========================================
// 对齐: welds 表（19 个核心列 + 自定义字段 + 图片引用）
// 用途: CRUD 接口与 CSV 导入导出管道共用
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// WeldRecord - 焊口检验记录
// ==========================================
// 说明: 除 id/审计字段外全部可空；date 仅在导入管道中视为必填
// 红线: 导入管道只插入,不修改已有记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeldRecord {
    /// 存储分配的主键（插入前为 None）
    pub id: Option<i64>,

    // ===== 核心字段（与 CSV 固定列一一对应）=====
    pub date: Option<String>, // 检验日期（ISO 8601, YYYY-MM-DD）
    pub type_fit: Option<String>,
    pub wps: Option<String>,
    pub pipe_dia: Option<String>,
    pub grade_class: Option<String>,
    pub weld_number: Option<String>,
    pub welder: Option<String>,
    pub first_ht_number: Option<String>,
    pub first_length: Option<String>,
    pub jt_number: Option<String>,
    pub second_ht_number: Option<String>,
    pub second_length: Option<String>,
    pub pre_heat: Option<String>,
    pub vt: Option<String>,
    pub process: Option<String>,
    pub nde_number: Option<String>,
    pub amps: Option<String>,
    pub volts: Option<String>,
    pub ipm: Option<String>,

    // ===== 扩展字段 =====
    /// 用户自定义字段（field_definitions 驱动的表单字段，JSON 存储）
    /// 注意: CSV 管道不处理此字段（固定 19 列限制）
    pub custom_fields: Option<serde_json::Value>,
    /// 图片引用路径（图片采集由外部协作方负责）
    pub image_path: Option<String>,

    // ===== 审计字段（存储层写入）=====
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

// ==========================================
// WeldDraft - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（CSV 行 → 别名解析 → 此结构 → 插入）
// 生命周期: 仅在单次导入流程内
#[derive(Debug, Clone, PartialEq)]
pub struct WeldDraft {
    /// 数据行号（1 起始，表头不计入，用于错误定位）
    pub row_number: usize,

    // 别名解析后的 19 个核心字段；无匹配别名或值为空 → None
    pub date: Option<String>,
    pub type_fit: Option<String>,
    pub wps: Option<String>,
    pub pipe_dia: Option<String>,
    pub grade_class: Option<String>,
    pub weld_number: Option<String>,
    pub welder: Option<String>,
    pub first_ht_number: Option<String>,
    pub first_length: Option<String>,
    pub jt_number: Option<String>,
    pub second_ht_number: Option<String>,
    pub second_length: Option<String>,
    pub pre_heat: Option<String>,
    pub vt: Option<String>,
    pub process: Option<String>,
    pub nde_number: Option<String>,
    pub amps: Option<String>,
    pub volts: Option<String>,
    pub ipm: Option<String>,
}

impl WeldDraft {
    /// 行是否可导入（唯一硬性要求: date 已解析出非空值）
    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    /// 转换为待插入的 WeldRecord
    pub fn into_record(self) -> WeldRecord {
        WeldRecord {
            id: None,
            date: self.date,
            type_fit: self.type_fit,
            wps: self.wps,
            pipe_dia: self.pipe_dia,
            grade_class: self.grade_class,
            weld_number: self.weld_number,
            welder: self.welder,
            first_ht_number: self.first_ht_number,
            first_length: self.first_length,
            jt_number: self.jt_number,
            second_ht_number: self.second_ht_number,
            second_length: self.second_length,
            pre_heat: self.pre_heat,
            vt: self.vt,
            process: self.process,
            nde_number: self.nde_number,
            amps: self.amps,
            volts: self.volts,
            ipm: self.ipm,
            custom_fields: None,
            image_path: None,
            created_at: None,
            updated_at: None,
        }
    }
}

// ==========================================
// RowError / ImportReport - 导入结果
// ==========================================

/// 单行插入失败记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowError {
    /// 数据行号（文件顺序，1 起始）
    pub row: usize,
    /// 存储层返回的错误描述
    pub error: String,
}

/// 导入汇总报告（单次导入调用产生，不持久化）
///
/// 口径:
/// - totalRows 只统计通过 date 过滤、实际尝试插入的行
/// - 无 date 的行静默排除，不计入任何计数
/// - successCount + errorCount == totalRows 恒成立
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub message: String,
    pub total_rows: usize,
    pub success_count: usize,
    pub error_count: usize,
    /// 逐行失败明细；为空时整个字段从响应中省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<RowError>>,
}
