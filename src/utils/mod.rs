//! 工具模块：日志输出等通用能力
pub mod log_sink;

pub use self::log_sink::{LogLine, LogSink, MemorySink, SilentSink, TracingSink};
