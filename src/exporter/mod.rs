// ==========================================
// 焊接检验记录系统 - 导出层
// ==========================================
// 职责: 存储记录 → 固定 19 列 CSV 文档
// 口径:
// - 列序与表头取自别名词表（每列的首选别名）
// - 表头行不加引号；数据值一律双引号包裹，内嵌引号成对转义
// - 零匹配记录 → NoData 错误（绝不输出只有表头的空文档）
// ==========================================

use crate::domain::weld::WeldRecord;
use crate::importer::aliases::CANONICAL_COLUMNS;
use crate::repository::error::RepositoryError;
use crate::repository::weld_repo::WeldRepository;
use std::sync::Arc;
use thiserror::Error;

/// 导出层错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    /// 过滤条件下无任何记录（与"空文档"是不同的对外信号）
    #[error("无可导出数据")]
    NoData,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 导出产物（字节体 + 传输元数据）
#[derive(Debug, Clone)]
pub struct CsvExport {
    /// 建议下载文件名
    pub filename: &'static str,
    /// 声明的内容类型
    pub content_type: &'static str,
    /// CSV 文本（\n 连接，无强制末尾换行）
    pub body: String,
}

// ==========================================
// WeldExporter - 导出引擎
// ==========================================
pub struct WeldExporter {
    repo: Arc<WeldRepository>,
}

impl WeldExporter {
    pub fn new(repo: Arc<WeldRepository>) -> Self {
        Self { repo }
    }

    /// 导出日期闭区间内的焊口记录为 CSV
    ///
    /// # 参数
    /// - date_from / date_to: 可选 ISO 日期下/上界（含端点）；缺省为无界
    ///
    /// # 排序
    /// date DESC，同日按录入时间倒序（最近录入在前）
    pub fn export_csv(
        &self,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> Result<CsvExport, ExportError> {
        let records = self.repo.query_by_date_range(date_from, date_to)?;

        if records.is_empty() {
            return Err(ExportError::NoData);
        }

        tracing::info!(rows = records.len(), "导出 CSV");

        Ok(CsvExport {
            filename: "welding-data.csv",
            content_type: "text/csv",
            body: encode_csv(&records),
        })
    }
}

/// 将记录序列编码为固定 19 列 CSV 文本
///
/// 独立纯函数，便于单测编码细节
pub fn encode_csv(records: &[WeldRecord]) -> String {
    let header: Vec<&str> = CANONICAL_COLUMNS.iter().map(|c| c.export_header).collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header.join(","));

    for record in records {
        let cells: Vec<String> = CANONICAL_COLUMNS
            .iter()
            .map(|column| quote_cell(field_value(record, column.field_name)))
            .collect();
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

/// 按存储字段名取记录中的值（仅核心 19 列）
fn field_value<'a>(record: &'a WeldRecord, field_name: &str) -> Option<&'a str> {
    let value = match field_name {
        "date" => &record.date,
        "type_fit" => &record.type_fit,
        "wps" => &record.wps,
        "pipe_dia" => &record.pipe_dia,
        "grade_class" => &record.grade_class,
        "weld_number" => &record.weld_number,
        "welder" => &record.welder,
        "first_ht_number" => &record.first_ht_number,
        "first_length" => &record.first_length,
        "jt_number" => &record.jt_number,
        "second_ht_number" => &record.second_ht_number,
        "second_length" => &record.second_length,
        "pre_heat" => &record.pre_heat,
        "vt" => &record.vt,
        "process" => &record.process,
        "nde_number" => &record.nde_number,
        "amps" => &record.amps,
        "volts" => &record.volts,
        "ipm" => &record.ipm,
        _ => &None,
    };
    value.as_deref()
}

/// 值一律双引号包裹；缺失值输出 ""；内嵌引号成对转义
fn quote_cell(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("\"{}\"", v.replace('"', "\"\"")),
        None => "\"\"".to_string(),
    }
}
