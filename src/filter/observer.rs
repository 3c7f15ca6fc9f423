//! 页面变更观察器
//! 订阅文档子树的节点增删，每批变更交给处理器完整执行后再取下一批，
//! 处理器自身造成的变更会作为新批次继续投递，直到文档不再变化

use crate::dom::{Document, MutationRecord};
use crate::error::FilterResult;

/// 变更处理器
pub trait MutationHandler {
    fn handle_mutations(&mut self, document: &mut Document, records: &[MutationRecord]) -> FilterResult<()>;
}

/// 变更观察器
#[derive(Debug, Default)]
pub struct ChangeObserver;

impl ChangeObserver {
    /// 开始观察文档
    pub fn observe(document: &mut Document) -> Self {
        document.observe();
        Self
    }

    /// 投递所有待处理批次，返回本次投递的批次数
    pub fn flush<H>(&mut self, document: &mut Document, handler: &mut H) -> FilterResult<usize>
    where
        H: MutationHandler + ?Sized,
    {
        let mut batches = 0;
        loop {
            let records = document.take_records();
            if records.is_empty() {
                break;
            }
            batches += 1;
            handler.handle_mutations(document, &records)?;
        }
        Ok(batches)
    }
}
