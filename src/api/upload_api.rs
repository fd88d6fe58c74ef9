// ==========================================
// 焊接检验记录系统 - CSV 导入导出API
// ==========================================
// 职责: 封装上传文件生命周期 + 导入/导出管道调用
// 红线: 上传临时产物在任何退出路径上都必须删除（RAII 守卫）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::weld::ImportReport;
use crate::exporter::{CsvExport, WeldExporter};
use crate::importer::WeldImporter;
use crate::repository::WeldRepository;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// TempUpload - 上传产物守卫
// ==========================================
/// 上传临时文件的 RAII 守卫
///
/// Drop 时删除文件，保证导入成功、行级失败、流级失败三种
/// 退出路径上产物都不残留
struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    /// 将上传字节写入临时目录（时间戳 + uuid 文件名，避免并发上传互踩）
    fn write(upload_dir: &Path, data: &[u8]) -> ApiResult<Self> {
        std::fs::create_dir_all(upload_dir)
            .map_err(|e| ApiError::InternalError(format!("创建上传目录失败: {}", e)))?;

        let path = upload_dir.join(format!(
            "upload-{}-{}.csv",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4()
        ));
        std::fs::write(&path, data)
            .map_err(|e| ApiError::InternalError(format!("写入上传文件失败: {}", e)))?;

        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "删除上传临时文件失败");
        }
    }
}

// ==========================================
// UploadApi
// ==========================================
pub struct UploadApi {
    upload_dir: PathBuf,
    importer: WeldImporter<WeldRepository>,
    exporter: WeldExporter,
}

impl UploadApi {
    /// 创建新的 UploadApi 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - upload_dir: 上传临时目录
    pub fn new(db_path: &str, upload_dir: PathBuf) -> ApiResult<Self> {
        let repo = Arc::new(
            WeldRepository::new(db_path)
                .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?,
        );

        Ok(Self {
            upload_dir,
            importer: WeldImporter::new(repo.clone()),
            exporter: WeldExporter::new(repo),
        })
    }

    /// 导入上传的 CSV 字节流
    ///
    /// # 返回
    /// - Ok(ImportReport): 汇总报告（部分行失败也是 Ok）
    /// - Err(ApiError): 流级失败（整体中止）
    pub async fn import_csv(&self, data: &[u8]) -> ApiResult<ImportReport> {
        let upload = TempUpload::write(&self.upload_dir, data)?;
        let report = self.importer.import_from_csv(upload.path()).await?;
        // upload 在此处离开作用域 → 临时文件删除（失败路径由 ? 提前返回时同样触发）
        Ok(report)
    }

    /// 导出日期区间内的记录为 CSV 附件
    pub async fn export_csv(
        &self,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> ApiResult<CsvExport> {
        let export = self.exporter.export_csv(date_from, date_to)?;
        Ok(export)
    }
}
