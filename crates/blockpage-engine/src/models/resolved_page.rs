use serde::Serialize;

use super::{BlockVariant, RawBlock};

/// A block whose tag matched a known variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBlock {
    pub variant: BlockVariant,
    pub block: RawBlock,
}

/// Outcome of resolving one fetched document.
///
/// `NotFound` and `EmptyContent` are ordinary results, not errors: the first
/// means no record matched, the second that a record matched but carried no
/// block list. A record whose block list is present but holds nothing
/// recognisable resolves to `Blocks(vec![])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResolvedPage {
    NotFound,
    EmptyContent,
    Blocks(Vec<ResolvedBlock>),
}

impl ResolvedPage {
    /// Resolved blocks in source order; empty for `NotFound` and `EmptyContent`.
    pub fn blocks(&self) -> &[ResolvedBlock] {
        match self {
            ResolvedPage::Blocks(blocks) => blocks,
            ResolvedPage::NotFound | ResolvedPage::EmptyContent => &[],
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolvedPage::NotFound)
    }

    pub fn variants(&self) -> Vec<BlockVariant> {
        self.blocks().iter().map(|b| b.variant).collect()
    }
}
