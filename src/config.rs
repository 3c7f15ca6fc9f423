//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认调试日志前缀
pub const DEFAULT_LOG_PREFIX: &str = "debug##prefix##: ";

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 键值存储文件路径（保存用户编辑后的站点配置）
    pub store_path: PathBuf,
    // 随包分发的默认配置文件，为空时使用内嵌默认配置
    pub bundled_config_path: Option<PathBuf>,
    // 是否输出调试日志
    pub verbose: bool,
    // 调试日志前缀
    pub log_prefix: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("content_filter_store.mp"),
            bundled_config_path: None,
            verbose: false,
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_path(mut self, path: PathBuf) -> Self {
        self.config.store_path = path;
        self
    }

    pub fn bundled_config_path(mut self, path: PathBuf) -> Self {
        self.config.bundled_config_path = Some(path);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.log_prefix = prefix.into();
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}
