//! DOM模块：页面文档的解析、查询与变更
pub mod document;

pub use self::document::{Document, MutationRecord, parse_selector, text_content};
