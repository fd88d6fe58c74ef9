// ==========================================
// 焊接检验记录系统 - 导入层
// ==========================================
// 职责: 半结构化 CSV → 规范化焊口记录
// 支持: CSV（UTF-8、逗号分隔、标准引号转义）
// ==========================================

// 模块声明
pub mod aliases;
pub mod csv_reader;
pub mod error;
pub mod row_mapper;
pub mod weld_importer;

// 重导出核心类型
pub use aliases::{column_by_field, CanonicalColumn, CANONICAL_COLUMNS};
pub use csv_reader::{parse_csv_rows, CsvRow};
pub use error::ImportError;
pub use row_mapper::RowMapper;
pub use weld_importer::WeldImporter;
