//! 内置谓词函数注册表
//! `function` 类型规则只能引用这里静态注册的函数，不支持运行时提供的表达式

use once_cell::sync::Lazy;
use regex::Regex;

/// 谓词函数：(字段值, 关键字) -> 是否命中，两者均已转为小写
pub type PredicateFn = fn(Option<&str>, &str) -> bool;

/// B站个人空间链接：//space.bilibili.com/<mid>
static BILIBILI_SPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"//space\.bilibili\.com/(\d+)").unwrap()
});

/// 已注册的谓词
static PREDICATES: &[(&str, PredicateFn)] = &[
    ("bilibili_mid_match", bilibili_mid_match as PredicateFn),
];

/// 按名称查找谓词
pub fn lookup(name: &str) -> Option<PredicateFn> {
    PREDICATES
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, predicate)| *predicate)
}

/// 从链接中提取B站用户mid并与关键字精确比较
fn bilibili_mid_match(value: Option<&str>, keyword: &str) -> bool {
    let Some(value) = value else {
        return false;
    };
    BILIBILI_SPACE_RE
        .captures(value)
        .and_then(|captures| captures.get(1))
        .is_some_and(|mid| mid.as_str() == keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert!(lookup("bilibili_mid_match").is_some());
        assert!(lookup("unknown_fn").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_bilibili_mid_match() {
        assert!(bilibili_mid_match(Some("https://space.bilibili.com/12345"), "12345"));
        assert!(bilibili_mid_match(Some("//space.bilibili.com/12345?spm_id=1"), "12345"));
        assert!(!bilibili_mid_match(Some("https://space.bilibili.com/67890"), "12345"));
        // 精确比较，前缀不算
        assert!(!bilibili_mid_match(Some("https://space.bilibili.com/123456"), "12345"));
        assert!(!bilibili_mid_match(Some("https://www.bilibili.com/video/bv1"), "12345"));
        assert!(!bilibili_mid_match(None, "12345"));
    }
}
