//! 匹配模块：规则求值、规则列表检查、内置谓词
pub mod predicate;
pub mod evaluator;
pub mod checker;

pub use self::evaluator::RuleEvaluator;
pub use self::checker::{ElementRuleChecker, RuleCheck};
pub use self::predicate::PredicateFn;
