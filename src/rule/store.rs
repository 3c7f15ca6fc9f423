//! 配置键值存储
//! 以 MessagePack 序列化的 `键 -> JSON文本` 映射持久化到本地文件，
//! 过滤器只读取其中的 `config` 键

use indexmap::IndexMap;
use rmp_serde::{Serializer, from_slice};
use serde::Serialize;
use tracing::debug;

use super::model::Configuration;
use crate::error::{ContentFilterError, FilterResult};
use crate::config::GlobalConfig;

/// 存放站点配置的键名
pub const CONFIG_KEY: &str = "config";

type StoreMap = IndexMap<String, String>;

/// 配置存储管理器
pub struct ConfigStore;

impl ConfigStore {
    /// 读取 `config` 键；存储文件不存在或无该键时返回 None
    pub async fn get_config(config: &GlobalConfig) -> FilterResult<Option<Configuration>> {
        let Some(text) = Self::get(config, CONFIG_KEY).await? else {
            return Ok(None);
        };
        let site_config = Configuration::from_json(&text)?;
        Ok(Some(site_config))
    }

    /// 写入 `config` 键
    pub async fn set_config(config: &GlobalConfig, site_config: &Configuration) -> FilterResult<()> {
        let text = site_config.to_json()?;
        Self::set(config, CONFIG_KEY, text).await
    }

    /// 读取任意键
    pub async fn get(config: &GlobalConfig, key: &str) -> FilterResult<Option<String>> {
        let mut map = Self::read_map(config).await?;
        Ok(map.swap_remove(key))
    }

    /// 写入任意键
    pub async fn set(config: &GlobalConfig, key: &str, value: String) -> FilterResult<()> {
        let mut map = Self::read_map(config).await?;
        map.insert(key.to_string(), value);
        Self::write_map(config, &map).await
    }

    /// 删除任意键
    pub async fn remove(config: &GlobalConfig, key: &str) -> FilterResult<()> {
        let mut map = Self::read_map(config).await?;
        if map.shift_remove(key).is_some() {
            Self::write_map(config, &map).await?;
        }
        Ok(())
    }

    async fn read_map(config: &GlobalConfig) -> FilterResult<StoreMap> {
        let store_path = &config.store_path;
        if !store_path.exists() {
            return Ok(StoreMap::new());
        }
        let data = tokio::fs::read(store_path).await?;

        // MessagePack反序列化
        let map: StoreMap = from_slice(&data)
            .map_err(|e| ContentFilterError::MsgPackError(format!("反序列化失败：{}", e)))?;

        debug!("存储文件反序列化成功，键数量：{}", map.len());
        Ok(map)
    }

    async fn write_map(config: &GlobalConfig, map: &StoreMap) -> FilterResult<()> {
        let mut data = Vec::new();

        // MessagePack序列化
        map.serialize(&mut Serializer::new(&mut data))
            .map_err(|e| ContentFilterError::MsgPackError(format!("序列化失败：{}", e)))?;

        tokio::fs::write(&config.store_path, data)
            .await
            .map_err(|e| ContentFilterError::ConfigStoreError(format!("写入存储文件失败：{}", e)))
    }
}
