use crate::editing::{Cmd, Document, InsertAt};
use crate::models::{BlockId, BlockType};

/// Ephemeral pointer-drag state
///
/// Lives with the host UI rather than in the document: it is never part of
/// a snapshot or an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub is_dragging: bool,
    pub dragged_block_id: Option<BlockId>,
    /// Index the pointer is currently over, for drawing the drop marker
    pub drag_over_index: Option<usize>,
    /// Set when the drag started from the block library
    pub new_block_type: Option<BlockType>,
}

/// Tracks one drag gesture from start to drop
///
/// Dropping resolves the gesture into a [`Cmd`] for the document: an insert
/// when dragging from the library, a move when reordering. Every exit path
/// returns the state to neutral.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Start dragging an existing block by its handle
    pub fn start_reorder(&mut self, id: BlockId) {
        self.state = DragState {
            is_dragging: true,
            dragged_block_id: Some(id),
            ..DragState::default()
        };
    }

    /// Start dragging a block type out of the library
    pub fn start_from_library(&mut self, block_type: BlockType) {
        self.state = DragState {
            is_dragging: true,
            new_block_type: Some(block_type),
            ..DragState::default()
        };
    }

    /// Record the index under the pointer; returns whether it changed
    pub fn drag_over(&mut self, index: usize) -> bool {
        if !self.state.is_dragging || self.state.drag_over_index == Some(index) {
            return false;
        }
        self.state.drag_over_index = Some(index);
        true
    }

    /// Finish the gesture over `target_index`
    ///
    /// Dropping past the last block uses the block count as the target.
    /// Returns `None` when nothing was being dragged or the dragged block no
    /// longer exists.
    pub fn drop_at(&mut self, doc: &Document, target_index: usize) -> Option<Cmd> {
        let state = std::mem::take(&mut self.state);
        if let Some(block_type) = state.new_block_type {
            return Some(Cmd::InsertBlock {
                block_type,
                at: InsertAt::Index(target_index),
                payload: None,
            });
        }

        let id = state.dragged_block_id?;
        let Some(from) = doc.index_of(id) else {
            log::debug!("dropped block {id} no longer exists");
            return None;
        };
        Some(Cmd::MoveBlock {
            from,
            to: target_index,
        })
    }

    /// The gesture ended without a drop (cancelled or released elsewhere)
    pub fn end(&mut self) {
        self.state = DragState::default();
    }
}
