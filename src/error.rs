//! 全局错误类型定义

use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum ContentFilterError {
    // 配置相关错误
    #[error("配置加载失败：{0}")]
    ConfigLoadError(String),
    #[error("配置存储失败：{0}")]
    ConfigStoreError(String),

    // DOM相关错误
    #[error("无效CSS选择器：{selector}（{reason}）")]
    InvalidSelector { selector: String, reason: String },

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),
    #[error("MessagePack序列化/反序列化失败：{0}")]
    MsgPackError(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type FilterResult<T> = Result<T, ContentFilterError>;
