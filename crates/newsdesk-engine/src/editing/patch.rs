use crate::editing::{EditError, FocusRequest};
use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    /// Blocks whose payload or position changed
    pub changed: Vec<BlockId>,
    pub inserted: Vec<BlockId>,
    pub removed: Vec<BlockId>,
    /// Selection after the command
    pub selection: Option<BlockId>,
    /// Focus transfer the host should perform, if any
    pub focus: Option<FocusRequest>,
    /// Document version after the command
    pub version: u64,
    /// Set when the command was refused; nothing else in the patch applies
    pub rejected: Option<EditError>,
}

impl Patch {
    pub(crate) fn rejected(error: EditError, selection: Option<BlockId>, version: u64) -> Self {
        Self {
            selection,
            version,
            rejected: Some(error),
            ..Self::default()
        }
    }

    /// True when the command left the block sequence exactly as it was
    pub fn is_noop(&self) -> bool {
        self.rejected.is_some()
            || (self.changed.is_empty() && self.inserted.is_empty() && self.removed.is_empty())
    }
}
