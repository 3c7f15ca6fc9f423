//! 过滤器初始化
//! 页面加载时只做一次：异步读取配置 -> 解析站点 -> 首次过滤并开始观察。
//! 任一步失败都只记录日志，过滤器不启动，也不重试

use std::sync::Arc;

use super::engine::ContentFilter;
use crate::config::GlobalConfig;
use crate::dom::Document;
use crate::rule::ConfigLoader;
use crate::utils::{LogSink, TracingSink};

/// 使用默认 tracing 日志初始化过滤器
pub async fn initialize_content_filter(config: &GlobalConfig, document: &mut Document) -> Option<ContentFilter> {
    let log: Arc<dyn LogSink> = Arc::new(TracingSink::from_config(config));
    initialize_content_filter_with_log(config, document, log).await
}

/// 使用指定日志实现初始化过滤器
///
/// 返回 None 表示配置加载或首次过滤失败；站点未匹配时返回未激活的过滤器
pub async fn initialize_content_filter_with_log(
    config: &GlobalConfig,
    document: &mut Document,
    log: Arc<dyn LogSink>,
) -> Option<ContentFilter> {
    let site_config = match ConfigLoader::load(config).await {
        Ok(site_config) => site_config,
        Err(e) => {
            log.error(&format!("Failed to load config: {}", e));
            return None;
        }
    };

    let mut filter = ContentFilter::new(&site_config, document.url(), log.clone());
    if let Err(e) = filter.start(document) {
        log.error(&format!("Failed to start content filter: {}", e));
        return None;
    }
    Some(filter)
}
