// ==========================================
// 焊接检验记录系统 - CSV 导入引擎
// ==========================================
// 职责: 驱动整个导入管道并产出汇总报告
// 流程: 解析CSV → 行映射 → date 过滤 → 逐行插入 → ImportReport
// 红线:
// - 行处理严格按文件顺序串行（行号是对外错误契约的一部分）
// - 单行插入失败不中止批次（韧性批量插入）
// - 无 date 的行静默排除，不计入任何计数
// ==========================================

use crate::domain::weld::{ImportReport, RowError, WeldDraft};
use crate::importer::csv_reader;
use crate::importer::error::ImportError;
use crate::importer::row_mapper::RowMapper;
use crate::repository::weld_repo::WeldImportRepository;
use std::path::Path;
use std::sync::Arc;

// ==========================================
// WeldImporter - 导入引擎
// ==========================================
/// CSV 导入引擎
///
/// # 职责
/// 1. 解析 CSV 文件
/// 2. 行映射（别名解析）
/// 3. date 存在性过滤
/// 4. 逐行插入（部分失败不中止）
/// 5. 产出 ImportReport
///
/// # 红线
/// - 只插入,不更新已有记录
/// - 所有数据库操作通过 Repository
pub struct WeldImporter<R: ?Sized>
where
    R: WeldImportRepository,
{
    repo: Arc<R>,
}

impl<R: ?Sized> WeldImporter<R>
where
    R: WeldImportRepository,
{
    /// 创建新的 WeldImporter 实例
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 从 CSV 文件导入焊口记录（主入口）
    ///
    /// # 参数
    /// - file_path: CSV 文件路径（上传产物）
    ///
    /// # 返回
    /// - Ok(ImportReport): 汇总报告（部分失败也是 Ok）
    /// - Err(ImportError): 流级失败（文件不可读/CSV 解析失败），整体中止
    ///
    /// # 口径
    /// - totalRows = 通过 date 过滤、实际尝试插入的行数
    /// - errors 按文件顺序排列，行号为该行在数据区的 1 起始序号
    pub async fn import_from_csv(&self, file_path: &Path) -> Result<ImportReport, ImportError> {
        // === 步骤 1: 解析 CSV 文件 ===
        let rows = csv_reader::parse_csv_rows(file_path)?;

        // === 步骤 2: 行映射 + date 过滤 ===
        let drafts: Vec<WeldDraft> = rows
            .iter()
            .map(RowMapper::map_row)
            .filter(WeldDraft::has_date)
            .collect();

        let total_rows = drafts.len();
        tracing::debug!(
            parsed = rows.len(),
            attempted = total_rows,
            "CSV 行映射完成"
        );

        // === 步骤 3: 逐行插入（串行，失败续行）===
        let mut success_count = 0;
        let mut error_count = 0;
        let mut errors: Vec<RowError> = Vec::new();

        for draft in drafts {
            let row_number = draft.row_number;
            match self.repo.insert_weld(draft.into_record()).await {
                Ok(_) => success_count += 1,
                Err(e) => {
                    error_count += 1;
                    tracing::warn!(row = row_number, error = %e, "行插入失败，继续处理后续行");
                    errors.push(RowError {
                        row: row_number,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            total_rows,
            success_count,
            error_count,
            "CSV 导入完成"
        );

        Ok(ImportReport {
            message: "CSV import completed".to_string(),
            total_rows,
            success_count,
            error_count,
            errors: if errors.is_empty() { None } else { Some(errors) },
        })
    }
}

// ==========================================
// 测试
// ==========================================
