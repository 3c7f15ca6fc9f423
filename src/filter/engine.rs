//! 内容过滤引擎
//! 两个相互独立的过程，每次调用都完整重跑：
//! 1. CSS选择器批量移除
//! 2. 卡片过滤：在卡片内按子选择器取目标元素并检查规则，命中则移除整张卡片

use std::ops::AddAssign;
use std::sync::Arc;

use scraper::{ElementRef, Selector};

use super::observer::{ChangeObserver, MutationHandler};
use super::resolver::SiteConfigResolver;
use crate::dom::{Document, MutationRecord, parse_selector};
use crate::error::{ContentFilterError, FilterResult};
use crate::matcher::ElementRuleChecker;
use crate::rule::{Configuration, FieldRuleSet, SiteProfile};
use crate::utils::LogSink;

/// 引擎生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// 未匹配到站点配置，永久保持不活动
    Uninitialized,
    /// 已解析站点配置，尚未启动
    ConfigResolved,
    /// 已完成首次过滤并在观察页面变更
    Active,
}

/// 过滤统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// CSS选择器移除的元素数
    pub removed_by_selector: usize,
    /// 卡片过滤移除的卡片数
    pub removed_cards: usize,
}

impl FilterStats {
    pub fn total(&self) -> usize {
        self.removed_by_selector + self.removed_cards
    }
}

impl AddAssign for FilterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.removed_by_selector += rhs.removed_by_selector;
        self.removed_cards += rhs.removed_cards;
    }
}

/// 卡片内的一个子选择器及其规则集，选择器在首次用到时才解析
struct TargetRule<'a> {
    sub_selector: &'a str,
    selector: Option<Selector>,
    rule_set: &'a FieldRuleSet,
}

impl TargetRule<'_> {
    fn selector(&mut self) -> FilterResult<&Selector> {
        let selector = match self.selector.take() {
            Some(selector) => selector,
            None => parse_selector(self.sub_selector)?,
        };
        Ok(self.selector.insert(selector))
    }
}

/// 内容过滤引擎
pub struct ContentFilter {
    site_profile: Option<SiteProfile>,
    matched_prefix: Option<String>,
    state: FilterState,
    observer: Option<ChangeObserver>,
    stats: FilterStats,
    log: Arc<dyn LogSink>,
}

impl ContentFilter {
    /// 创建引擎并解析当前页面对应的站点配置
    pub fn new(config: &Configuration, url: &str, log: Arc<dyn LogSink>) -> Self {
        let resolved = SiteConfigResolver::resolve_entry(url, config, log.as_ref());
        let state = if resolved.is_some() {
            FilterState::ConfigResolved
        } else {
            FilterState::Uninitialized
        };
        Self {
            matched_prefix: resolved.map(|(prefix, _)| prefix.to_string()),
            site_profile: resolved.map(|(_, profile)| profile.clone()),
            state,
            observer: None,
            stats: FilterStats::default(),
            log,
        }
    }

    /// 使用已确定的站点配置创建引擎
    pub fn with_profile(site_profile: SiteProfile, log: Arc<dyn LogSink>) -> Self {
        Self {
            site_profile: Some(site_profile),
            matched_prefix: None,
            state: FilterState::ConfigResolved,
            observer: None,
            stats: FilterStats::default(),
            log,
        }
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    pub fn site_profile(&self) -> Option<&SiteProfile> {
        self.site_profile.as_ref()
    }

    /// 命中的站点前缀
    pub fn matched_prefix(&self) -> Option<&str> {
        self.matched_prefix.as_deref()
    }

    /// 累计过滤统计（包含首次过滤与所有变更触发的过滤）
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// 首次过滤并开始观察页面变更；无站点配置时什么也不做
    pub fn start(&mut self, document: &mut Document) -> FilterResult<FilterStats> {
        if self.state != FilterState::ConfigResolved {
            return Ok(FilterStats::default());
        }

        let stats = self.run(document)?;
        self.stats += stats;
        self.observer = Some(ChangeObserver::observe(document));
        self.state = FilterState::Active;
        Ok(stats)
    }

    /// 处理页面上累积的变更，返回投递的批次数
    pub fn process_mutations(&mut self, document: &mut Document) -> FilterResult<usize> {
        let Some(mut observer) = self.observer.take() else {
            return Ok(0);
        };
        let result = observer.flush(document, self);
        self.observer = Some(observer);
        result
    }

    /// 执行两个过滤过程
    pub fn run(&self, document: &mut Document) -> FilterResult<FilterStats> {
        Ok(FilterStats {
            removed_by_selector: self.remove_by_css_selector(document)?,
            removed_cards: self.filter_content(document)?,
        })
    }

    /// CSS选择器批量移除，列表合并为一个选择器组
    pub fn remove_by_css_selector(&self, document: &mut Document) -> FilterResult<usize> {
        let Some(selectors) = self
            .site_profile
            .as_ref()
            .and_then(|profile| profile.css_selector.as_ref())
            .filter(|selectors| !selectors.is_empty())
        else {
            return Ok(0);
        };

        let group = parse_selector(&selectors.join(","))?;
        Ok(document.remove_where(&group, |_| true))
    }

    /// 卡片过滤
    pub fn filter_content(&self, document: &mut Document) -> FilterResult<usize> {
        let Some(filter) = self
            .site_profile
            .as_ref()
            .and_then(|profile| profile.filter.as_ref())
        else {
            return Ok(0);
        };

        let log = self.log.as_ref();
        let mut removed = 0;
        for (main_selector, targets) in filter {
            let cards = parse_selector(main_selector)?;
            let mut targets: Vec<TargetRule<'_>> = targets
                .iter()
                .map(|(sub_selector, rule_set)| TargetRule {
                    sub_selector,
                    selector: None,
                    rule_set,
                })
                .collect();

            log.debug(&format!("找到的卡片数量：{}", document.select(&cards).count()), false);

            // 子选择器出错后不再检查后续卡片，已判定命中的卡片照常移除
            let mut failure: Option<ContentFilterError> = None;
            removed += document.remove_where(&cards, |card| {
                if failure.is_some() {
                    return false;
                }
                Self::match_card(&card, main_selector, &mut targets, log).unwrap_or_else(|e| {
                    failure = Some(e);
                    false
                })
            });
            if let Some(e) = failure {
                return Err(e);
            }
        }
        Ok(removed)
    }

    /// 按声明顺序检查子选择器，首个目标存在且规则命中即判定移除
    fn match_card(
        card: &ElementRef<'_>,
        main_selector: &str,
        targets: &mut [TargetRule<'_>],
        log: &dyn LogSink,
    ) -> FilterResult<bool> {
        for target in targets.iter_mut() {
            let Some(element) = card.select(target.selector()?).next() else {
                continue;
            };
            let Some(rules) = &target.rule_set.rules else {
                continue;
            };

            let result = ElementRuleChecker::check(&element, rules, log);
            if result.matched {
                log.debug(
                    &format!(
                        "移除元素, 匹配值: {}, {}, {}",
                        main_selector,
                        target.sub_selector,
                        result.value.unwrap_or_default()
                    ),
                    true,
                );
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl MutationHandler for ContentFilter {
    fn handle_mutations(&mut self, document: &mut Document, _records: &[MutationRecord]) -> FilterResult<()> {
        // 不区分具体变更节点，始终重新扫描整个文档
        let stats = self.run(document)?;
        self.stats += stats;
        Ok(())
    }
}
