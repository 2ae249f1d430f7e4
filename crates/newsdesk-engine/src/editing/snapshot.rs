use serde::Serialize;

use crate::editing::TextDirection;
use crate::models::{Block, BlockId};

/// Owned view of a document at one version
///
/// Hosts render from snapshots; mutating a snapshot never affects the
/// document it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub version: u64,
    pub blocks: Vec<Block>,
    pub selection: Option<BlockId>,
    pub direction: TextDirection,
}

impl Snapshot {
    pub fn selected_block(&self) -> Option<&Block> {
        let id = self.selection?;
        self.blocks.iter().find(|block| block.id() == id)
    }

    /// Total words across all blocks
    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| block.metadata().word_count)
            .sum()
    }

    /// Total reading time in minutes, summed per block
    pub fn reading_time(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| block.metadata().reading_time)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::editing::{Document, InsertAt};
    use crate::models::{BlockPatch, BlockType};

    #[test]
    fn test_snapshot_is_detached_from_document() {
        let mut doc = Document::new();
        let id = doc.blocks()[0].id();
        doc.update(id, BlockPatch::html("one two"));

        let mut snapshot = doc.snapshot();
        snapshot.blocks.clear();

        assert_eq!(doc.block_count(), 1);
        assert_eq!(doc.snapshot().word_count(), 2);
    }

    #[test]
    fn test_totals_and_selection() {
        let mut doc = Document::new();
        let first = doc.blocks()[0].id();
        doc.update(first, BlockPatch::html("one two three"));
        let quote = doc.insert(BlockType::Quote, InsertAt::End, None);
        doc.update(quote, BlockPatch::text("four five"));

        let snapshot = doc.snapshot();

        assert_eq!(snapshot.word_count(), 5);
        assert_eq!(snapshot.reading_time(), 2);
        assert_eq!(snapshot.selected_block().map(|block| block.id()), Some(quote));
    }
}
