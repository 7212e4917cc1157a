use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - storage: 链接文档的后端与路径、写入重试
/// - links: 链接 ID 生成与点击统计策略
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值
    /// ENV 前缀：SL，分隔符：__
    /// 示例：SL__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("SL")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// `file` or `memory`
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_write_retries")]
    pub write_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 链接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_id_length")]
    pub id_length: usize,
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,
    /// Base used for the `url` returned on create, e.g. `https://music.example.com`.
    /// Falls back to the request's scheme and host when unset.
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Drop click reports for platforms the link does not offer.
    #[serde(default)]
    pub reject_unknown_platform_clicks: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// Shortest id length accepted; 62^8 ids keeps random collisions negligible.
pub const MIN_ID_LENGTH: usize = 8;

impl LinksConfig {
    /// `id_length` clamped to [`MIN_ID_LENGTH`]..=64.
    pub fn effective_id_length(&self) -> usize {
        self.id_length.clamp(MIN_ID_LENGTH, 64)
    }
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_storage_backend() -> String {
    "file".to_string()
}

fn default_data_file() -> String {
    "data/links.json".to_string()
}

fn default_write_retries() -> u32 {
    2
}

fn default_retry_base_delay_ms() -> u64 {
    50
}

fn default_retry_max_delay_ms() -> u64 {
    1000
}

fn default_id_length() -> usize {
    MIN_ID_LENGTH
}

fn default_max_id_attempts() -> u32 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_file: default_data_file(),
            write_retries: default_write_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            id_length: default_id_length(),
            max_id_attempts: default_max_id_attempts(),
            public_base_url: None,
            reject_unknown_platform_clicks: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, "file");
        assert_eq!(config.storage.data_file, "data/links.json");
        assert_eq!(config.links.id_length, 8);
        assert!(!config.links.reject_unknown_platform_clicks);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_id_length_is_clamped() {
        let mut links = LinksConfig::default();
        links.id_length = 4;
        assert_eq!(links.effective_id_length(), MIN_ID_LENGTH);
        links.id_length = 12;
        assert_eq!(links.effective_id_length(), 12);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StaticConfig = toml::from_str(
            r#"
            [server]
            port = 8088

            [links]
            reject_unknown_platform_clicks = true
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.links.reject_unknown_platform_clicks);
        assert_eq!(config.storage.write_retries, 2);
    }

    #[test]
    fn test_sample_config_parses_back() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[storage]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.links.max_id_attempts, 16);
    }
}
