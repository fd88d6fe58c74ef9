// ==========================================
// 焊接检验记录系统 - 列名别名表
// ==========================================
// 职责: 19 个固定核心列的唯一词表，导入导出两侧共用
// 说明:
// - aliases 为显式优先级列表: 历史大写/空格表头优先，snake_case 兜底
// - export_header 即每列的首选别名（导出表头）
// - 静态配置，不随 field_definitions 变化（固定 19 列限制）
// ==========================================

use std::collections::HashMap;

/// 单个核心列的词表条目
#[derive(Debug, Clone, Copy)]
pub struct CanonicalColumn {
    /// 存储字段名（welds 表列名）
    pub field_name: &'static str,
    /// 导出表头标签
    pub export_header: &'static str,
    /// 导入接受的表头拼写（按优先级排序）
    pub aliases: &'static [&'static str],
}

impl CanonicalColumn {
    /// 按别名优先级，从一行 CSV 数据中解析本列的值
    ///
    /// 取第一个"表头存在且值非空"的别名；全部缺失 → None（不产生空串）
    pub fn resolve(&self, row: &HashMap<String, String>) -> Option<String> {
        for alias in self.aliases {
            if let Some(value) = row.get(*alias) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}

/// 固定 19 列词表（导出列序即此数组顺序）
pub const CANONICAL_COLUMNS: [CanonicalColumn; 19] = [
    CanonicalColumn {
        field_name: "date",
        export_header: "DATE",
        aliases: &["DATE", "date"],
    },
    CanonicalColumn {
        field_name: "type_fit",
        export_header: "TYPE FIT",
        aliases: &["TYPE FIT", "type_fit"],
    },
    CanonicalColumn {
        field_name: "wps",
        export_header: "WPS",
        aliases: &["WPS", "wps"],
    },
    CanonicalColumn {
        field_name: "pipe_dia",
        export_header: "PIPE DIA",
        aliases: &["PIPE DIA", "pipe_dia"],
    },
    CanonicalColumn {
        field_name: "grade_class",
        export_header: "GRADE /CLASS",
        aliases: &["GRADE /CLASS", "grade_class"],
    },
    CanonicalColumn {
        field_name: "weld_number",
        export_header: "WELD #",
        aliases: &["WELD #", "weld_number"],
    },
    CanonicalColumn {
        field_name: "welder",
        export_header: "WELDER",
        aliases: &["WELDER", "welder"],
    },
    CanonicalColumn {
        field_name: "first_ht_number",
        export_header: "1st HT#",
        aliases: &["1st HT#", "first_ht_number"],
    },
    CanonicalColumn {
        field_name: "first_length",
        export_header: "1st Length",
        aliases: &["1st Length", "first_length"],
    },
    CanonicalColumn {
        field_name: "jt_number",
        export_header: "JT",
        aliases: &["JT", "jt_number"],
    },
    CanonicalColumn {
        field_name: "second_ht_number",
        export_header: "2nd HT#",
        aliases: &["2nd HT#", "second_ht_number"],
    },
    CanonicalColumn {
        field_name: "second_length",
        export_header: "2nd Length",
        aliases: &["2nd Length", "second_length"],
    },
    CanonicalColumn {
        field_name: "pre_heat",
        export_header: "PRE HEAT",
        aliases: &["PRE HEAT", "pre_heat"],
    },
    CanonicalColumn {
        field_name: "vt",
        export_header: "VT",
        aliases: &["VT", "vt"],
    },
    CanonicalColumn {
        field_name: "process",
        export_header: "Process",
        aliases: &["Process", "process"],
    },
    CanonicalColumn {
        field_name: "nde_number",
        export_header: "NDE",
        aliases: &["NDE", "nde_number"],
    },
    CanonicalColumn {
        field_name: "amps",
        export_header: "Amps",
        aliases: &["Amps", "amps"],
    },
    CanonicalColumn {
        field_name: "volts",
        export_header: "Volts",
        aliases: &["Volts", "volts"],
    },
    CanonicalColumn {
        field_name: "ipm",
        export_header: "IPM",
        aliases: &["IPM", "ipm"],
    },
];

/// 按存储字段名查词表条目
pub fn column_by_field(field_name: &str) -> Option<&'static CanonicalColumn> {
    CANONICAL_COLUMNS.iter().find(|c| c.field_name == field_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_nineteen_columns_with_unique_field_names() {
        assert_eq!(CANONICAL_COLUMNS.len(), 19);
        let mut names: Vec<&str> = CANONICAL_COLUMNS.iter().map(|c| c.field_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 19);
    }

    #[test]
    fn test_export_header_is_first_alias() {
        for column in &CANONICAL_COLUMNS {
            assert_eq!(column.export_header, column.aliases[0]);
        }
    }

    #[test]
    fn test_resolve_prefers_legacy_header_over_snake_case() {
        let column = column_by_field("date").unwrap();
        let values = row(&[("DATE", "2024-01-15"), ("date", "2024-02-20")]);
        assert_eq!(column.resolve(&values).as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn test_resolve_falls_through_empty_values() {
        let column = column_by_field("weld_number").unwrap();
        let values = row(&[("WELD #", "  "), ("weld_number", "W001")]);
        assert_eq!(column.resolve(&values).as_deref(), Some("W001"));
    }

    #[test]
    fn test_resolve_missing_yields_none_not_empty_string() {
        let column = column_by_field("welder").unwrap();
        let values = row(&[("WELDER", "")]);
        assert_eq!(column.resolve(&values), None);
    }
}
