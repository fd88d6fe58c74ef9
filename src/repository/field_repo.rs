// ==========================================
// 焊接检验记录系统 - 字段定义仓储
// ==========================================
// 职责: 管理 field_definitions 表（CRUD + 批量重排）
// 说明: 重排后 field_order 重写为 0..N-1 稠密序列（同值按 id 破平），
//       使存储顺序始终与列表位置一致
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::field::{FieldDefinition, FieldOrderUpdate, FieldType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

pub struct FieldDefinitionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FieldDefinitionRepository {
    /// 创建新的 Repository 实例
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
            CREATE TABLE IF NOT EXISTS field_definitions (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              field_name TEXT NOT NULL UNIQUE,
              display_name TEXT NOT NULL,
              field_type TEXT NOT NULL DEFAULT 'text',
              is_required INTEGER NOT NULL DEFAULT 0,
              is_editable INTEGER NOT NULL DEFAULT 1,
              field_order INTEGER NOT NULL DEFAULT 0,
              validation_rules TEXT,
              created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
              updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
            );

            CREATE INDEX IF NOT EXISTS idx_field_definitions_order
              ON field_definitions(field_order ASC);
            "#,
        )?;
        Ok(())
    }

    /// 列出全部字段定义（field_order ASC，同值按 id 破平）
    pub fn list(&self) -> RepositoryResult<Vec<FieldDefinition>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM field_definitions ORDER BY field_order ASC, id ASC",
        )?;
        let rows = stmt.query_map([], row_to_field)?;

        let mut fields = Vec::new();
        for row in rows {
            fields.push(row?);
        }
        Ok(fields)
    }

    /// 按 ID 查询
    pub fn get(&self, id: i64) -> RepositoryResult<FieldDefinition> {
        let conn = self.get_conn()?;
        conn.query_row(
            "SELECT * FROM field_definitions WHERE id = ?1",
            params![id],
            row_to_field,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Field".to_string(),
                id: id.to_string(),
            },
            other => other.into(),
        })
    }

    /// 创建字段定义，返回带主键的实体
    pub fn create(&self, field: &FieldDefinition) -> RepositoryResult<FieldDefinition> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO field_definitions (
                field_name, display_name, field_type, is_required,
                is_editable, field_order, validation_rules
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                field.field_name,
                field.display_name,
                field.field_type.as_str(),
                field.is_required as i64,
                field.is_editable as i64,
                field.field_order,
                field
                    .validation_rules
                    .as_ref()
                    .map(|v| v.to_string()),
            ],
        )?;

        let id = conn.last_insert_rowid();
        conn.query_row(
            "SELECT * FROM field_definitions WHERE id = ?1",
            params![id],
            row_to_field,
        )
        .map_err(RepositoryError::from)
    }

    /// 更新字段定义（全字段覆盖，updated_at 刷新）
    pub fn update(&self, id: i64, field: &FieldDefinition) -> RepositoryResult<FieldDefinition> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE field_definitions SET
                field_name = ?1, display_name = ?2, field_type = ?3,
                is_required = ?4, is_editable = ?5, field_order = ?6,
                validation_rules = ?7,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
            WHERE id = ?8
            "#,
            params![
                field.field_name,
                field.display_name,
                field.field_type.as_str(),
                field.is_required as i64,
                field.is_editable as i64,
                field.field_order,
                field
                    .validation_rules
                    .as_ref()
                    .map(|v| v.to_string()),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Field".to_string(),
                id: id.to_string(),
            });
        }

        conn.query_row(
            "SELECT * FROM field_definitions WHERE id = ?1",
            params![id],
            row_to_field,
        )
        .map_err(RepositoryError::from)
    }

    /// 删除字段定义
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM field_definitions WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Field".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// 批量重排（单事务）
    ///
    /// 流程:
    /// 1. 按请求写入各 id 的 field_order
    /// 2. 按 (field_order, id) 重新读取，重写为 0..N-1 稠密序列
    ///
    /// 任一 id 不存在 → 整个事务回滚
    pub fn reorder(&self, updates: &[FieldOrderUpdate]) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        for update in updates {
            let affected = tx.execute(
                "UPDATE field_definitions SET field_order = ?1, \
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now') WHERE id = ?2",
                params![update.order, update.id],
            )?;
            if affected == 0 {
                return Err(RepositoryError::NotFound {
                    entity: "Field".to_string(),
                    id: update.id.to_string(),
                });
            }
        }

        // 稠密化: 0..N-1，同 order 按 id 破平
        let ids: Vec<i64> = {
            let mut stmt =
                tx.prepare("SELECT id FROM field_definitions ORDER BY field_order ASC, id ASC")?;
            let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        for (position, id) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE field_definitions SET field_order = ?1 WHERE id = ?2",
                params![position as i64, id],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }
}

/// 行映射: field_definitions 表列 → FieldDefinition
fn row_to_field(row: &Row<'_>) -> rusqlite::Result<FieldDefinition> {
    let field_type: String = row.get("field_type")?;
    let validation_rules: Option<String> = row.get("validation_rules")?;
    Ok(FieldDefinition {
        id: row.get("id")?,
        field_name: row.get("field_name")?,
        display_name: row.get("display_name")?,
        field_type: FieldType::parse(&field_type),
        is_required: row.get::<_, i64>("is_required")? != 0,
        is_editable: row.get::<_, i64>("is_editable")? != 0,
        field_order: row.get("field_order")?,
        validation_rules: validation_rules.and_then(|s| serde_json::from_str(&s).ok()),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
