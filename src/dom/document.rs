//! 页面文档
//! 在 scraper 解析出的 DOM 之上提供过滤所需的最小能力：
//! 选择器查询、属性/文本读取、节点移除、子树插入，以及类似 MutationObserver 的变更记录

use scraper::element_ref::Select;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{ContentFilterError, FilterResult};

/// 一次DOM结构变更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRecord {
    pub added: usize,
    pub removed: usize,
}

/// 页面文档
#[derive(Debug)]
pub struct Document {
    url: String,
    html: Html,
    observing: bool,
    pending: Vec<MutationRecord>,
}

/// 解析CSS选择器
pub fn parse_selector(selector: &str) -> FilterResult<Selector> {
    Selector::parse(selector).map_err(|e| ContentFilterError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// 元素文本内容（所有后代文本节点拼接）
pub fn text_content(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

impl Document {
    /// 解析完整HTML文档，`url` 为页面地址
    pub fn parse(url: &str, html: &str) -> FilterResult<Self> {
        // 只校验合法性，站点匹配使用原始字符串
        Url::parse(url)?;
        Ok(Self {
            url: url.to_string(),
            html: Html::parse_document(html),
            observing: false,
            pending: Vec::new(),
        })
    }

    /// 页面地址
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 当前文档序列化后的HTML
    pub fn html(&self) -> String {
        self.html.html()
    }

    /// 统计匹配选择器的元素数量
    pub fn select_count(&self, selector: &str) -> FilterResult<usize> {
        let selector = parse_selector(selector)?;
        Ok(self.select(&selector).count())
    }

    /// 遍历匹配选择器的元素
    ///
    /// 从根元素向下遍历，已移除（脱离文档树）的节点及其后代不会再被选中
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.root_element().select(selector)
    }

    /// 移除所有匹配 `selector` 且满足 `predicate` 的元素，返回移除数量
    ///
    /// 先对全部匹配元素求值再统一移除，嵌套命中的元素同样会被计数
    pub fn remove_where<F>(&mut self, selector: &Selector, mut predicate: F) -> usize
    where
        F: FnMut(ElementRef<'_>) -> bool,
    {
        let doomed: Vec<_> = self
            .select(selector)
            .filter(|element| predicate(*element))
            .map(|element| element.id())
            .collect();

        let mut removed = 0;
        for id in doomed {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }

        self.record(MutationRecord { added: 0, removed });
        removed
    }

    /// 将HTML片段追加到首个匹配 `parent_selector` 的元素末尾（模拟动态加载内容）
    pub fn append_html(&mut self, parent_selector: &str, fragment: &str) -> FilterResult<usize> {
        let selector = parse_selector(parent_selector)?;
        let Some(parent_id) = self.select(&selector).next().map(|element| element.id()) else {
            return Err(ContentFilterError::InvalidInput(format!(
                "未找到父元素：{}",
                parent_selector
            )));
        };

        let fragment = Html::parse_fragment(fragment);
        let top_level: Vec<_> = fragment.root_element().children().collect();
        let added = top_level.len();

        // 深度优先复制片段节点，逆序入栈保证兄弟节点顺序不变
        let mut stack: Vec<_> = top_level.into_iter().rev().map(|node| (node, parent_id)).collect();
        while let Some((source, parent)) = stack.pop() {
            let Some(mut dest) = self.html.tree.get_mut(parent) else {
                continue;
            };
            let id = dest.append(source.value().clone()).id();
            stack.extend(source.children().rev().map(|child| (child, id)));
        }

        self.record(MutationRecord { added, removed: 0 });
        Ok(added)
    }

    /// 开始记录变更
    ///
    /// 记录范围为整个文档，body 之外（如 head）的增删同样会产生记录
    pub fn observe(&mut self) {
        self.observing = true;
    }

    /// 是否正在记录变更
    pub fn is_observed(&self) -> bool {
        self.observing
    }

    /// 取出当前批次的变更记录
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending)
    }

    fn record(&mut self, record: MutationRecord) {
        if self.observing && (record.added > 0 || record.removed > 0) {
            self.pending.push(record);
        }
    }
}
