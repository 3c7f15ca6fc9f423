//! rscontentfilter - 按站点配置移除网页中不需要的元素

// 导出全局错误类型
pub use self::error::{ContentFilterError, FilterResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    Configuration, SiteProfile, FilterMap, FieldRuleSet, Rule, RuleKind,
    ConfigLoader, ConfigSource, ConfigStore
};

// 导出DOM模块核心接口
pub use self::dom::{Document, MutationRecord};

// 导出匹配模块核心接口
pub use self::matcher::{RuleEvaluator, ElementRuleChecker, RuleCheck};

// 导出工具模块核心接口
pub use self::utils::{LogSink, TracingSink, SilentSink, MemorySink};

// 导出过滤模块核心接口
pub use self::filter::{
    SiteConfigResolver,
    ChangeObserver,
    MutationHandler,
    ContentFilter,
    FilterState,
    FilterStats,
    initialize_content_filter,
    initialize_content_filter_with_log,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod dom;
pub mod matcher;
pub mod utils;
pub mod filter;
