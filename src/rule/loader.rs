//! 配置加载管理器
//! 负责在页面初始化时一次性读取站点配置：优先键值存储，其次随包配置文件

use tracing::{debug, warn};

use super::model::Configuration;
use super::store::ConfigStore;
use crate::error::{ContentFilterError, FilterResult};
use crate::config::GlobalConfig;

/// 内嵌默认配置
pub const DEFAULT_CONFIG_JSON: &str = include_str!("../../data/config.json");

/// 配置来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// 键值存储中的 `config` 键
    Store,
    /// 随包分发的配置文件
    BundledFile,
    /// 内嵌默认配置
    Embedded,
}

/// 配置加载管理器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 加载配置（优先存储，存储中无配置则使用随包配置）
    pub async fn load(config: &GlobalConfig) -> FilterResult<Configuration> {
        Self::load_with_source(config).await.map(|(site_config, _)| site_config)
    }

    /// 加载配置并返回实际来源
    pub async fn load_with_source(config: &GlobalConfig) -> FilterResult<(Configuration, ConfigSource)> {
        // 1. 优先读取存储
        if let Some(site_config) = ConfigStore::get_config(config).await? {
            debug!("从存储加载配置成功，站点数：{}", site_config.site_config.len());
            return Ok((site_config, ConfigSource::Store));
        }
        debug!("存储中没有配置，使用默认配置");

        // 2. 随包配置文件
        if let Some(path) = &config.bundled_config_path {
            let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                ContentFilterError::ConfigLoadError(format!("读取配置文件 {} 失败：{}", path.display(), e))
            })?;
            let site_config = Configuration::from_json(&text)?;
            debug!("从配置文件加载成功，站点数：{}", site_config.site_config.len());
            return Ok((site_config, ConfigSource::BundledFile));
        }

        // 3. 内嵌默认配置
        let site_config = Self::embedded_default()?;
        Ok((site_config, ConfigSource::Embedded))
    }

    /// 解析内嵌默认配置
    pub fn embedded_default() -> FilterResult<Configuration> {
        Configuration::from_json(DEFAULT_CONFIG_JSON).map_err(|e| {
            warn!("内嵌默认配置解析失败：{}", e);
            ContentFilterError::from(e)
        })
    }
}
