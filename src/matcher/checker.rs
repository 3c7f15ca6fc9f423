//! 元素规则检查器
//! 按顺序对一个元素应用规则列表，首个命中的规则决定结果

use scraper::ElementRef;

use super::evaluator::RuleEvaluator;
use crate::rule::Rule;
use crate::utils::LogSink;

/// 规则检查结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleCheck {
    pub matched: bool,
    /// 命中描述，形如 `href: https://...` 或 `textContent: ...`
    pub value: Option<String>,
}

impl RuleCheck {
    fn hit(rule: &Rule, value: Option<&str>) -> Self {
        Self {
            matched: true,
            value: Some(format!("{}: {}", rule.field_name(), value.unwrap_or("null"))),
        }
    }
}

/// 元素规则检查器
pub struct ElementRuleChecker;

impl ElementRuleChecker {
    pub fn check(element: &ElementRef<'_>, rules: &[Rule], log: &dyn LogSink) -> RuleCheck {
        for rule in rules {
            let value = RuleEvaluator::extract_value(element, rule);
            if RuleEvaluator::evaluate_value(value.as_deref(), rule, log) {
                return RuleCheck::hit(rule, value.as_deref());
            }
        }
        RuleCheck::default()
    }
}
