//! 站点配置数据模型定义
//! 仅存储配置数据，无任何业务逻辑，支持序列化/反序列化
//! 所有映射均使用 IndexMap，保持 JSON 中的声明顺序（站点匹配与规则顺序都依赖它）

use std::fmt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 完整配置：站点URL前缀 -> 站点配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(rename = "sit_config", alias = "site_config", default)]
    pub site_config: IndexMap<String, SiteProfile>,
}

impl Configuration {
    /// 从JSON文本解析
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// 序列化为JSON文本
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// 单个站点配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteProfile {
    /// 无条件移除的CSS选择器列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<Vec<String>>,
    /// 卡片选择器 -> (卡片内子选择器 -> 字段规则集)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterMap>,
}

/// 卡片过滤映射
pub type FilterMap = IndexMap<String, IndexMap<String, FieldRuleSet>>;

/// 字段规则集（有序，首个命中即生效）
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FieldRuleSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
}

/// 规则类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// 关键字包含匹配（忽略大小写，并非真正的正则）
    Regexp,
    /// 调用内置谓词函数
    Function,
    /// 未识别的类型，永不匹配
    #[default]
    #[serde(other)]
    Unknown,
}

/// 单条比较规则
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Rule {
    #[serde(rename = "type", default)]
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default)]
    pub text_content: bool,
    #[serde(default)]
    pub value_set: Vec<String>,
}

impl Rule {
    /// 关键字包含规则
    pub fn regexp(attribute: &str, value_set: &[&str]) -> Self {
        Self {
            kind: RuleKind::Regexp,
            attribute: Some(attribute.to_string()),
            value_set: value_set.iter().map(|v| v.to_string()).collect(),
            ..Self::default()
        }
    }

    /// 谓词函数规则
    pub fn function(function: &str, attribute: &str, value_set: &[&str]) -> Self {
        Self {
            kind: RuleKind::Function,
            function: Some(function.to_string()),
            attribute: Some(attribute.to_string()),
            value_set: value_set.iter().map(|v| v.to_string()).collect(),
            ..Self::default()
        }
    }

    /// 改为读取元素文本内容
    pub fn on_text_content(mut self) -> Self {
        self.text_content = true;
        self
    }

    /// 取值字段名称：文本内容为 `textContent`，否则为属性名
    pub fn field_name(&self) -> &str {
        if self.text_content {
            "textContent"
        } else {
            self.attribute.as_deref().unwrap_or("null")
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Regexp => write!(f, "regexp"),
            RuleKind::Function => write!(f, "function"),
            RuleKind::Unknown => write!(f, "unknown"),
        }
    }
}
