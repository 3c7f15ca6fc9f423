//! 站点配置解析器
//! 按配置声明顺序查找第一个作为当前URL前缀的站点，不做最长前缀匹配、不做URL规范化

use crate::rule::{Configuration, SiteProfile};
use crate::utils::LogSink;

/// 站点配置解析器
pub struct SiteConfigResolver;

impl SiteConfigResolver {
    /// 返回当前URL对应的站点配置
    pub fn resolve<'a>(url: &str, config: &'a Configuration, log: &dyn LogSink) -> Option<&'a SiteProfile> {
        Self::resolve_entry(url, config, log).map(|(_, profile)| profile)
    }

    /// 返回命中的前缀及其站点配置
    pub fn resolve_entry<'a>(
        url: &str,
        config: &'a Configuration,
        log: &dyn LogSink,
    ) -> Option<(&'a str, &'a SiteProfile)> {
        log.debug(&format!("current_url: {}", url), false);
        let (prefix, profile) = config
            .site_config
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))?;
        log.debug(&format!("match: {}", prefix), true);
        Some((prefix.as_str(), profile))
    }
}
