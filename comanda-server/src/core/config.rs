use chrono::FixedOffset;
use std::path::PathBuf;
use std::time::Duration;

/// 服务器配置 - 从环境变量加载
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATA_DIR | ./data | 数据文件目录 (comandas.json, cardapio.csv ...) |
/// | HTTP_HOST | 0.0.0.0 | 监听地址 |
/// | HTTP_PORT | 5001 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 日志格式 |
/// | LOG_DIR | (unset) | 日志文件目录, 按天滚动 |
/// | ALERT_POLL_INTERVAL_MS | 1000 | 订单状态轮询间隔(毫秒) |
/// | REPORT_UTC_OFFSET_MINUTES | -180 | 报表本地时区偏移(分钟) |
/// | SEED_DEMO_DATA | false | 空数据时写入演示订单 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/srv/comanda HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录
    pub data_dir: PathBuf,
    pub http_host: String,
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 订单状态轮询间隔 (毫秒)
    pub alert_poll_interval_ms: u64,
    /// 报表使用的固定时区偏移 (UTC 以东的分钟数)
    pub report_utc_offset_minutes: i32,
    /// 订单文件为空时写入两条演示订单
    pub seed_demo_data: bool,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: env_or("HTTP_PORT", 5001),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            alert_poll_interval_ms: env_or("ALERT_POLL_INTERVAL_MS", 1000),
            report_utc_offset_minutes: env_or("REPORT_UTC_OFFSET_MINUTES", -180),
            seed_demo_data: env_or("SEED_DEMO_DATA", false),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10000),
        }
    }

    /// 使用指定数据目录的配置，其余取默认值
    ///
    /// 常用于测试场景 (不读取环境变量)
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            http_host: "127.0.0.1".into(),
            http_port: 0,
            environment: "test".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            alert_poll_interval_ms: 1000,
            report_utc_offset_minutes: -180,
            seed_demo_data: false,
            shutdown_timeout_ms: 10000,
        }
    }

    pub fn orders_file(&self) -> PathBuf {
        self.data_dir.join("comandas.json")
    }

    pub fn menu_file(&self) -> PathBuf {
        self.data_dir.join("cardapio.csv")
    }

    pub fn suppliers_file(&self) -> PathBuf {
        self.data_dir.join("fornecedores.json")
    }

    pub fn purchases_file(&self) -> PathBuf {
        self.data_dir.join("compras.json")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    pub fn report_offset(&self) -> FixedOffset {
        shared::util::offset_from_minutes(self.report_utc_offset_minutes)
    }

    pub fn alert_poll_interval(&self) -> Duration {
        Duration::from_millis(self.alert_poll_interval_ms.max(1))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir_paths() {
        let config = Config::with_data_dir("/tmp/comanda");
        assert_eq!(config.orders_file(), PathBuf::from("/tmp/comanda/comandas.json"));
        assert_eq!(config.menu_file(), PathBuf::from("/tmp/comanda/cardapio.csv"));
        assert_eq!(config.suppliers_file(), PathBuf::from("/tmp/comanda/fornecedores.json"));
        assert_eq!(config.purchases_file(), PathBuf::from("/tmp/comanda/compras.json"));
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_report_offset() {
        let config = Config::with_data_dir("/tmp/comanda");
        assert_eq!(config.report_offset().local_minus_utc(), -180 * 60);
    }
}
