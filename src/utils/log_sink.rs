//! 日志输出能力
//! 过滤引擎不直接依赖全局调试开关，而是在构造时注入日志实现，
//! 测试中可以静默或捕获日志内容

use std::sync::Mutex;
use tracing::{debug, error};

use crate::config::GlobalConfig;

const HIGHLIGHT_START: &str = "\x1b[31m";
const HIGHLIGHT_END: &str = "\x1b[0m";

/// 日志输出接口
pub trait LogSink: Send + Sync {
    /// 调试日志，`highlight` 为真时表示需要突出显示（如匹配站点、移除元素）
    fn debug(&self, message: &str, highlight: bool);

    /// 错误日志，始终输出
    fn error(&self, message: &str);
}

/// 基于 tracing 的默认日志实现
#[derive(Debug, Clone)]
pub struct TracingSink {
    verbose: bool,
    prefix: String,
}

impl TracingSink {
    pub fn new(verbose: bool, prefix: impl Into<String>) -> Self {
        Self {
            verbose,
            prefix: prefix.into(),
        }
    }

    /// 按全局配置创建
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self::new(config.verbose, config.log_prefix.clone())
    }

    /// 拼接前缀与高亮控制符
    fn format(&self, message: &str, highlight: bool) -> String {
        if highlight {
            format!("{}{}{}{}", HIGHLIGHT_START, self.prefix, message, HIGHLIGHT_END)
        } else {
            format!("{}{}", self.prefix, message)
        }
    }
}

impl LogSink for TracingSink {
    fn debug(&self, message: &str, highlight: bool) {
        if self.verbose {
            debug!("{}", self.format(message, highlight));
        }
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

/// 丢弃所有日志
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl LogSink for SilentSink {
    fn debug(&self, _message: &str, _highlight: bool) {}

    fn error(&self, _message: &str) {}
}

/// 一条被捕获的日志
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Debug { message: String, highlight: bool },
    Error(String),
}

/// 内存日志，记录所有输出，主要用于测试断言
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<LogLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取已记录日志的快照
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// 仅获取错误日志
    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                LogLine::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    fn push(&self, line: LogLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl LogSink for MemorySink {
    fn debug(&self, message: &str, highlight: bool) {
        self.push(LogLine::Debug {
            message: message.to_string(),
            highlight,
        });
    }

    fn error(&self, message: &str) {
        self.push(LogLine::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    /// 供 tracing-subscriber 写入的共享缓冲区
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// 在临时安装的订阅器下执行 `f`，返回格式化后的全部输出
    fn capture(f: impl FnOnce()) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        buf.contents()
    }

    #[test]
    fn test_tracing_sink_quiet_drops_debug_keeps_errors() {
        let output = capture(|| {
            let sink = TracingSink::new(false, "p: ");
            sink.debug("hidden line", false);
            sink.debug("hidden hit", true);
            sink.error("load failed");
        });

        assert!(!output.contains("hidden"));
        assert!(!output.contains("DEBUG"));
        assert!(output.contains("ERROR"));
        assert!(output.contains("load failed"));
    }

    #[test]
    fn test_tracing_sink_verbose_emits_prefix_and_highlight() {
        let output = capture(|| {
            let sink = TracingSink::new(true, "p: ");
            sink.debug("plain line", false);
            sink.debug("matched site", true);
            sink.error("boom");
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("DEBUG") && lines[0].contains("p: plain line"));
        assert!(!lines[0].contains("[31m"));
        // 控制字符可能被输出层转义，只断言可见部分
        assert!(lines[1].contains("DEBUG") && lines[1].contains("p: matched site"));
        assert!(lines[1].contains("[31m") && lines[1].contains("[0m"));
        assert!(lines[2].contains("ERROR") && lines[2].contains("boom"));
    }

    #[test]
    fn test_tracing_sink_format() {
        let sink = TracingSink::new(true, "p: ");
        assert_eq!(sink.format("hello", false), "p: hello");
        assert_eq!(sink.format("hit", true), "\x1b[31mp: hit\x1b[0m");
    }

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.debug("a", false);
        sink.error("boom");
        sink.debug("b", true);

        assert_eq!(
            sink.lines(),
            vec![
                LogLine::Debug { message: "a".to_string(), highlight: false },
                LogLine::Error("boom".to_string()),
                LogLine::Debug { message: "b".to_string(), highlight: true },
            ]
        );
        assert_eq!(sink.errors(), vec!["boom".to_string()]);
    }
}
