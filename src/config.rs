// ==========================================
// 焊接检验记录系统 - 运行配置
// ==========================================
// 职责: 从环境变量读取服务配置，提供平台数据目录回退
// 约束: 配置只在启动时读取一次，运行期不热更新
// ==========================================

use std::path::PathBuf;

/// 默认 HTTP 监听端口（与历史部署保持一致）
pub const DEFAULT_PORT: u16 = 3001;

/// 服务运行配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP 监听端口
    pub port: u16,
    /// SQLite 数据库文件路径
    pub db_path: String,
    /// CSV 上传临时目录
    pub upload_dir: PathBuf,
}

impl AppConfig {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    /// - PORT: HTTP 监听端口（默认 3001）
    /// - WELDING_LOG_DB_PATH: 数据库路径（默认用户数据目录）
    /// - WELDING_LOG_UPLOAD_DIR: 上传临时目录（默认系统临时目录下 welding-log-uploads）
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let db_path = get_default_db_path();

        let upload_dir = std::env::var("WELDING_LOG_UPLOAD_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("welding-log-uploads"));

        Self {
            port,
            db_path,
            upload_dir,
        }
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录回退
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("WELDING_LOG_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./welding_log.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        let app_dir = data_dir.join("welding-log-dev");
        #[cfg(not(debug_assertions))]
        let app_dir = data_dir.join("welding-log");

        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join("welding_log.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_from_env_defaults() {
        let config = AppConfig::from_env();
        assert!(config.port > 0);
        assert!(!config.db_path.is_empty());
    }
}
