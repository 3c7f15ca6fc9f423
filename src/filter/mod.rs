//! 过滤模块：站点解析、过滤引擎、变更观察与初始化
pub mod resolver;
pub mod observer;
pub mod engine;
pub mod init;

// 导出核心接口
pub use self::resolver::SiteConfigResolver;
pub use self::observer::{ChangeObserver, MutationHandler};
pub use self::engine::{ContentFilter, FilterState, FilterStats};
pub use self::init::{initialize_content_filter, initialize_content_filter_with_log};
