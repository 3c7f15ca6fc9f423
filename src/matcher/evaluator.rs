//! 规则求值器
//! 对单个元素与单条规则给出是否命中

use scraper::ElementRef;

use super::predicate;
use crate::dom::text_content;
use crate::rule::{Rule, RuleKind};
use crate::utils::LogSink;

/// 规则求值器
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// 读取规则对应的字段值：文本内容或指定属性，属性缺失时为 None
    pub fn extract_value(element: &ElementRef<'_>, rule: &Rule) -> Option<String> {
        if rule.text_content {
            return Some(text_content(element));
        }
        let attribute = rule.attribute.as_deref()?;
        element.value().attr(attribute).map(str::to_string)
    }

    /// 判断元素是否命中规则
    pub fn evaluate(element: &ElementRef<'_>, rule: &Rule, log: &dyn LogSink) -> bool {
        let value = Self::extract_value(element, rule);
        Self::evaluate_value(value.as_deref(), rule, log)
    }

    /// 对已提取的字段值求值
    pub fn evaluate_value(value: Option<&str>, rule: &Rule, log: &dyn LogSink) -> bool {
        match rule.kind {
            RuleKind::Regexp => Self::contains_any(value, &rule.value_set),
            RuleKind::Function => Self::call_predicate(value, rule, log),
            RuleKind::Unknown => false,
        }
    }

    /// 忽略大小写的关键字包含匹配（不做正则解析）
    fn contains_any(value: Option<&str>, keywords: &[String]) -> bool {
        let Some(value) = value else {
            return false;
        };
        let value = value.to_lowercase();
        keywords
            .iter()
            .any(|keyword| value.contains(&keyword.to_lowercase()))
    }

    /// 调用注册表中的谓词，任一关键字命中即为真
    fn call_predicate(value: Option<&str>, rule: &Rule, log: &dyn LogSink) -> bool {
        let Some(predicate) = rule.function.as_deref().and_then(predicate::lookup) else {
            let name = rule.function.as_deref().unwrap_or("null");
            log.error(&format!("Unsupported function: {}", name));
            return false;
        };

        let value = value.map(str::to_lowercase);
        rule.value_set
            .iter()
            .any(|keyword| predicate(value.as_deref(), &keyword.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};
    use crate::utils::{MemorySink, SilentSink};

    fn with_element<R>(html: &str, f: impl FnOnce(ElementRef<'_>) -> R) -> R {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("#target").unwrap();
        let element = fragment.select(&selector).next().unwrap();
        f(element)
    }

    #[test]
    fn test_regexp_is_case_insensitive_substring() {
        let rule = Rule::regexp("href", &["SPAM"]);
        with_element(r#"<a id="target" href="https://spam-site.com/x">x</a>"#, |el| {
            assert!(RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
        with_element(r#"<a id="target" href="https://ok-site.com/x">x</a>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
    }

    #[test]
    fn test_regexp_is_not_a_regex() {
        // `.` 与 `*` 按字面量处理
        let rule = Rule::regexp("title", &["a.*b"]);
        with_element(r#"<p id="target" title="axxb">x</p>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
        with_element(r#"<p id="target" title="see a.*b here">x</p>"#, |el| {
            assert!(RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
    }

    #[test]
    fn test_missing_attribute_never_matches() {
        let rule = Rule::regexp("data-owner", &[""]);
        with_element(r#"<p id="target">x</p>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });

        let mut no_attribute = Rule::regexp("href", &["x"]);
        no_attribute.attribute = None;
        with_element(r#"<a id="target" href="x">x</a>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &no_attribute, &SilentSink));
        });
    }

    #[test]
    fn test_text_content_rule() {
        let rule = Rule::regexp("ignored", &["sponsored"]).on_text_content();
        with_element(r#"<div id="target"><span>Sponsored</span> post</div>"#, |el| {
            assert_eq!(RuleEvaluator::extract_value(&el, &rule).as_deref(), Some("Sponsored post"));
            assert!(RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
    }

    #[test]
    fn test_bilibili_function_rule() {
        let rule = Rule::function("bilibili_mid_match", "href", &["12345"]);
        with_element(r#"<a id="target" href="https://space.bilibili.com/12345">up</a>"#, |el| {
            assert!(RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
        with_element(r#"<a id="target" href="https://space.bilibili.com/67890">up</a>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
        with_element(r#"<a id="target">up</a>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
    }

    #[test]
    fn test_function_rule_lowercases_value() {
        let rule = Rule::function("bilibili_mid_match", "href", &["12345"]);
        with_element(r#"<a id="target" href="HTTPS://SPACE.BILIBILI.COM/12345">up</a>"#, |el| {
            assert!(RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
    }

    #[test]
    fn test_unknown_function_logs_and_returns_false() {
        let log = MemorySink::new();
        let rule = Rule::function("unknown_fn", "href", &["x"]);
        with_element(r#"<a id="target" href="x">x</a>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &log));
            assert!(!RuleEvaluator::evaluate(&el, &rule, &log));
        });
        assert_eq!(
            log.errors(),
            vec!["Unsupported function: unknown_fn".to_string(); 2]
        );
    }

    #[test]
    fn test_function_rule_without_name_logs_placeholder() {
        let log = MemorySink::new();
        let mut rule = Rule::function("bilibili_mid_match", "href", &["42"]);
        rule.function = None;
        with_element(r#"<a id="target" href="https://space.bilibili.com/42">x</a>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &log));
        });
        assert_eq!(log.errors(), vec!["Unsupported function: null".to_string()]);
    }

    #[test]
    fn test_unknown_kind_never_matches() {
        let mut rule = Rule::regexp("href", &["x"]);
        rule.kind = RuleKind::Unknown;
        with_element(r#"<a id="target" href="x">x</a>"#, |el| {
            assert!(!RuleEvaluator::evaluate(&el, &rule, &SilentSink));
        });
    }
}
