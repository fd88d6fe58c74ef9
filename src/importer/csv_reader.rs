// ==========================================
// 焊接检验记录系统 - CSV 文件解析
// ==========================================
// 职责: 文件 → 带行号的 (表头 → 值) 映射序列
// 约定: UTF-8、逗号分隔、标准双引号转义、首行为表头
// ==========================================

use crate::importer::error::ImportError;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 一行 CSV 数据（瞬态，不落库）
#[derive(Debug, Clone)]
pub struct CsvRow {
    /// 数据行号（1 起始，表头不计入）
    pub row_number: usize,
    /// 表头 → 去空白后的原始值
    pub values: HashMap<String, String>,
}

/// 解析 CSV 文件为带行号的行序列
///
/// # 行为
/// - 表头单元去首尾空白
/// - 完全空白的行跳过（不消耗行号，与上游解析器口径一致）
/// - 任一记录解析失败 → 整体失败（流级错误，中止本次导入）
pub fn parse_csv_rows(file_path: &Path) -> Result<Vec<CsvRow>, ImportError> {
    if !file_path.exists() {
        return Err(ImportError::FileNotFound(
            file_path.display().to_string(),
        ));
    }

    let file = File::open(file_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(file);

    // 读取表头
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // 读取所有行
    let mut rows = Vec::new();
    let mut row_number = 0;
    for result in reader.records() {
        let record = result?;

        let mut values = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                values.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if values.values().all(|v| v.is_empty()) {
            continue;
        }

        row_number += 1;
        rows.push(CsvRow { row_number, values });
    }

    Ok(rows)
}
