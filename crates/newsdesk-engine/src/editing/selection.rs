use std::time::Duration;

use crate::models::BlockId;

/// Where inside a block the caret should land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The block's main editable surface
    Content,
    /// A table cell
    Cell { row: usize, col: usize },
    /// An item of a list block
    ListItem(usize),
}

/// A request for the host to move keyboard focus
///
/// The host waits `delay` before focusing so the newly rendered block has
/// mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub block_id: BlockId,
    pub target: FocusTarget,
    pub delay: Duration,
}

/// Single-block selection plus at most one pending focus transfer
///
/// Selection is separate from block content: changing it never mutates a
/// block. A new focus request replaces any pending one, so only the latest
/// structural mutation decides where the caret goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<BlockId>,
    pending_focus: Option<FocusRequest>,
}

impl Selection {
    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn pending_focus(&self) -> Option<&FocusRequest> {
        self.pending_focus.as_ref()
    }

    pub(crate) fn select(&mut self, id: BlockId) {
        self.selected = Some(id);
    }

    pub(crate) fn select_and_focus(
        &mut self,
        id: BlockId,
        target: FocusTarget,
        delay: Duration,
    ) -> FocusRequest {
        let request = FocusRequest {
            block_id: id,
            target,
            delay,
        };
        self.selected = Some(id);
        self.pending_focus = Some(request);
        request
    }

    pub(crate) fn clear(&mut self) {
        self.selected = None;
    }

    /// Drop a pending focus request aimed at a block that no longer exists
    pub(crate) fn forget(&mut self, id: BlockId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self
            .pending_focus
            .is_some_and(|request| request.block_id == id)
        {
            self.pending_focus = None;
        }
    }

    pub(crate) fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.pending_focus.take()
    }
}
