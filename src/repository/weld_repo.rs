// ==========================================
// 焊接检验记录系统 - 焊口记录仓储
// ==========================================
// 职责: 管理 welds 表（CRUD + 日期区间查询）
// 约束: 所有查询使用参数化,防止 SQL 注入
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::weld::WeldRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// WeldImportRepository - 导入管道的存储接缝
// ==========================================
// 说明: 导入器对此 trait 泛型，便于测试中用可注入失败的替身
#[async_trait]
pub trait WeldImportRepository: Send + Sync {
    /// 插入单条焊口记录，返回带主键的记录
    async fn insert_weld(&self, record: WeldRecord) -> RepositoryResult<WeldRecord>;
}

/// 列表查询过滤条件（分页 + 模糊搜索 + 日期区间）
#[derive(Debug, Clone, Default)]
pub struct WeldListFilter {
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// 页码（1 起始）
    pub page: u32,
    /// 每页条数
    pub limit: u32,
}

// ==========================================
// WeldRepository
// ==========================================
pub struct WeldRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WeldRepository {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_table()?;
        Ok(repo)
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS welds (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              date TEXT,
              type_fit TEXT,
              wps TEXT,
              pipe_dia TEXT,
              grade_class TEXT,
              weld_number TEXT,
              welder TEXT,
              first_ht_number TEXT,
              first_length TEXT,
              jt_number TEXT,
              second_ht_number TEXT,
              second_length TEXT,
              pre_heat TEXT,
              vt TEXT,
              process TEXT,
              nde_number TEXT,
              amps TEXT,
              volts TEXT,
              ipm TEXT,
              custom_fields TEXT,
              image_path TEXT,
              created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
              updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
            );

            CREATE INDEX IF NOT EXISTS idx_welds_date
              ON welds(date DESC);
            CREATE INDEX IF NOT EXISTS idx_welds_created_at
              ON welds(created_at DESC);
            "#,
        )?;
        Ok(())
    }

    /// 插入焊口记录，返回带主键与审计字段的完整记录
    pub fn insert(&self, record: &WeldRecord) -> RepositoryResult<WeldRecord> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO welds (
                date, type_fit, wps, pipe_dia, grade_class, weld_number, welder,
                first_ht_number, first_length, jt_number, second_ht_number, second_length,
                pre_heat, vt, process, nde_number, amps, volts, ipm,
                custom_fields, image_path
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21
            )
            "#,
            params![
                record.date,
                record.type_fit,
                record.wps,
                record.pipe_dia,
                record.grade_class,
                record.weld_number,
                record.welder,
                record.first_ht_number,
                record.first_length,
                record.jt_number,
                record.second_ht_number,
                record.second_length,
                record.pre_heat,
                record.vt,
                record.process,
                record.nde_number,
                record.amps,
                record.volts,
                record.ipm,
                record
                    .custom_fields
                    .as_ref()
                    .map(|v| v.to_string()),
                record.image_path,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let inserted = conn.query_row("SELECT * FROM welds WHERE id = ?1", params![id], row_to_weld)?;
        Ok(inserted)
    }

    /// 按 ID 查询
    pub fn get(&self, id: i64) -> RepositoryResult<WeldRecord> {
        let conn = self.get_conn()?;
        conn.query_row("SELECT * FROM welds WHERE id = ?1", params![id], row_to_weld)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                    entity: "Weld".to_string(),
                    id: id.to_string(),
                },
                other => other.into(),
            })
    }

    /// 分页列表查询（date DESC, created_at DESC）
    pub fn list(&self, filter: &WeldListFilter) -> RepositoryResult<Vec<WeldRecord>> {
        let conn = self.get_conn()?;

        let mut sql = String::from("SELECT * FROM welds WHERE 1=1");
        let mut args: Vec<String> = Vec::new();

        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let idx = args.len() + 1;
            sql.push_str(&format!(
                " AND (weld_number LIKE ?{0} OR welder LIKE ?{0} OR type_fit LIKE ?{0})",
                idx
            ));
            args.push(format!("%{}%", search.trim()));
        }
        if let Some(from) = filter.date_from.as_deref().filter(|s| !s.trim().is_empty()) {
            sql.push_str(&format!(" AND date >= ?{}", args.len() + 1));
            args.push(from.to_string());
        }
        if let Some(to) = filter.date_to.as_deref().filter(|s| !s.trim().is_empty()) {
            sql.push_str(&format!(" AND date <= ?{}", args.len() + 1));
            args.push(to.to_string());
        }

        let page = filter.page.max(1) as u64;
        let limit = filter.limit.clamp(1, 500) as u64;
        let offset = (page - 1) * limit;
        sql.push_str(&format!(
            " ORDER BY date DESC, created_at DESC, id DESC LIMIT {} OFFSET {}",
            limit, offset
        ));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), row_to_weld)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// 导出查询: 日期闭区间过滤，date DESC、同日按录入时间倒序
    ///
    /// 说明: 行号不分页，导出管道一次取全量
    pub fn query_by_date_range(
        &self,
        date_from: Option<&str>,
        date_to: Option<&str>,
    ) -> RepositoryResult<Vec<WeldRecord>> {
        let conn = self.get_conn()?;

        let mut sql = String::from("SELECT * FROM welds WHERE 1=1");
        let mut args: Vec<String> = Vec::new();

        // 空白串视为未给出边界（与 list 的 search 口径一致）
        if let Some(from) = date_from.filter(|s| !s.trim().is_empty()) {
            sql.push_str(&format!(" AND date >= ?{}", args.len() + 1));
            args.push(from.to_string());
        }
        if let Some(to) = date_to.filter(|s| !s.trim().is_empty()) {
            sql.push_str(&format!(" AND date <= ?{}", args.len() + 1));
            args.push(to.to_string());
        }
        sql.push_str(" ORDER BY date DESC, created_at DESC, id DESC");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), row_to_weld)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// 更新焊口记录（全字段覆盖，updated_at 刷新）
    pub fn update(&self, id: i64, record: &WeldRecord) -> RepositoryResult<WeldRecord> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE welds SET
                date = ?1, type_fit = ?2, wps = ?3, pipe_dia = ?4, grade_class = ?5,
                weld_number = ?6, welder = ?7, first_ht_number = ?8, first_length = ?9,
                jt_number = ?10, second_ht_number = ?11, second_length = ?12,
                pre_heat = ?13, vt = ?14, process = ?15, nde_number = ?16,
                amps = ?17, volts = ?18, ipm = ?19, custom_fields = ?20, image_path = ?21,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
            WHERE id = ?22
            "#,
            params![
                record.date,
                record.type_fit,
                record.wps,
                record.pipe_dia,
                record.grade_class,
                record.weld_number,
                record.welder,
                record.first_ht_number,
                record.first_length,
                record.jt_number,
                record.second_ht_number,
                record.second_length,
                record.pre_heat,
                record.vt,
                record.process,
                record.nde_number,
                record.amps,
                record.volts,
                record.ipm,
                record
                    .custom_fields
                    .as_ref()
                    .map(|v| v.to_string()),
                record.image_path,
                id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Weld".to_string(),
                id: id.to_string(),
            });
        }

        conn.query_row("SELECT * FROM welds WHERE id = ?1", params![id], row_to_weld)
            .map_err(RepositoryError::from)
    }

    /// 删除焊口记录
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM welds WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Weld".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl WeldImportRepository for WeldRepository {
    async fn insert_weld(&self, record: WeldRecord) -> RepositoryResult<WeldRecord> {
        self.insert(&record)
    }
}

/// 行映射: welds 表列 → WeldRecord
///
/// 列顺序与 ensure_table 的建表语句保持一致
fn row_to_weld(row: &Row<'_>) -> rusqlite::Result<WeldRecord> {
    let custom_fields: Option<String> = row.get("custom_fields")?;
    Ok(WeldRecord {
        id: row.get("id")?,
        date: row.get("date")?,
        type_fit: row.get("type_fit")?,
        wps: row.get("wps")?,
        pipe_dia: row.get("pipe_dia")?,
        grade_class: row.get("grade_class")?,
        weld_number: row.get("weld_number")?,
        welder: row.get("welder")?,
        first_ht_number: row.get("first_ht_number")?,
        first_length: row.get("first_length")?,
        jt_number: row.get("jt_number")?,
        second_ht_number: row.get("second_ht_number")?,
        second_length: row.get("second_length")?,
        pre_heat: row.get("pre_heat")?,
        vt: row.get("vt")?,
        process: row.get("process")?,
        nde_number: row.get("nde_number")?,
        amps: row.get("amps")?,
        volts: row.get("volts")?,
        ipm: row.get("ipm")?,
        custom_fields: custom_fields.and_then(|s| serde_json::from_str(&s).ok()),
        image_path: row.get("image_path")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
