// ==========================================
// 焊接检验记录系统 - 行映射器
// ==========================================
// 职责: 一行 CSV 数据 → WeldDraft（别名解析）
// 红线: 纯函数，无副作用；除 date 的存在性外不做任何校验/类型转换
// ==========================================

use crate::domain::weld::WeldDraft;
use crate::importer::aliases::column_by_field;
use crate::importer::csv_reader::CsvRow;
use std::collections::HashMap;

pub struct RowMapper;

impl RowMapper {
    /// 将一行 CSV 数据映射为导入候选
    ///
    /// 每个核心字段按词表的别名优先级解析；无匹配 → None。
    /// 非 date 字段一律按不透明字符串处理（表单层才做 is_required 等校验）。
    pub fn map_row(row: &CsvRow) -> WeldDraft {
        let values = &row.values;
        WeldDraft {
            row_number: row.row_number,
            date: resolve(values, "date"),
            type_fit: resolve(values, "type_fit"),
            wps: resolve(values, "wps"),
            pipe_dia: resolve(values, "pipe_dia"),
            grade_class: resolve(values, "grade_class"),
            weld_number: resolve(values, "weld_number"),
            welder: resolve(values, "welder"),
            first_ht_number: resolve(values, "first_ht_number"),
            first_length: resolve(values, "first_length"),
            jt_number: resolve(values, "jt_number"),
            second_ht_number: resolve(values, "second_ht_number"),
            second_length: resolve(values, "second_length"),
            pre_heat: resolve(values, "pre_heat"),
            vt: resolve(values, "vt"),
            process: resolve(values, "process"),
            nde_number: resolve(values, "nde_number"),
            amps: resolve(values, "amps"),
            volts: resolve(values, "volts"),
            ipm: resolve(values, "ipm"),
        }
    }
}

fn resolve(values: &HashMap<String, String>, field_name: &str) -> Option<String> {
    // 词表为编译期常量；字段名与 CANONICAL_COLUMNS 的一致性由 aliases 测试保证
    column_by_field(field_name).and_then(|column| column.resolve(values))
}
