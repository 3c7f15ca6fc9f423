//! 规则模块：负责站点配置的数据模型、存储与加载
pub mod model;
pub mod store;
pub mod loader;

// 导出核心接口
pub use self::model::{Configuration, SiteProfile, FilterMap, FieldRuleSet, Rule, RuleKind};
pub use self::loader::{ConfigLoader, ConfigSource};
pub use self::store::{ConfigStore, CONFIG_KEY};
