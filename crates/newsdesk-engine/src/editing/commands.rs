use std::time::Duration;

use crate::editing::{Document, EditError, FocusRequest, FocusTarget, Patch};
use crate::models::{
    Block, BlockData, BlockId, BlockPatch, BlockType, CellStep, EmbedDescriptor, TableGrid,
};
use crate::parsing::words;

/// Position for a new block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// Clamped into `0..=len`
    Index(usize),
    End,
}

impl InsertAt {
    /// Normalise a signed host index: `-1` appends, other negatives clamp to the front
    pub fn from_signed(index: i64) -> Self {
        match index {
            -1 => InsertAt::End,
            i if i < 0 => InsertAt::Index(0),
            i => InsertAt::Index(usize::try_from(i).unwrap_or(usize::MAX)),
        }
    }

    fn resolve(self, len: usize) -> usize {
        match self {
            InsertAt::Index(index) => index.min(len),
            InsertAt::End => len,
        }
    }
}

impl From<usize> for InsertAt {
    fn from(index: usize) -> Self {
        InsertAt::Index(index)
    }
}

/// Every mutation of a [`Document`] is one of these
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// New block with default payload, optionally overlaid with `payload`
    InsertBlock {
        block_type: BlockType,
        at: InsertAt,
        payload: Option<BlockPatch>,
    },
    UpdateBlock {
        id: BlockId,
        patch: BlockPatch,
    },
    DeleteBlock {
        id: BlockId,
    },
    MoveBlock {
        from: usize,
        to: usize,
    },
    DuplicateBlock {
        id: BlockId,
    },
    /// Paragraphs inserted after `after`, in order; the last one is selected
    FanOut {
        after: BlockId,
        contents: Vec<String>,
    },
    AddTableRow {
        id: BlockId,
        after: Option<usize>,
    },
    AddTableColumn {
        id: BlockId,
        after: Option<usize>,
    },
    RemoveTableRow {
        id: BlockId,
        row: usize,
    },
    RemoveTableColumn {
        id: BlockId,
        col: usize,
    },
    SetTableCell {
        id: BlockId,
        row: usize,
        col: usize,
        value: String,
    },
    /// Tab or Shift+Tab inside a table cell
    TabFromCell {
        id: BlockId,
        row: usize,
        col: usize,
        backwards: bool,
    },
    SetListItem {
        id: BlockId,
        index: usize,
        value: String,
    },
    InsertListItem {
        id: BlockId,
        after: usize,
    },
    RemoveListItem {
        id: BlockId,
        index: usize,
    },
    SetEmbed {
        id: BlockId,
        descriptor: EmbedDescriptor,
    },
}

impl Document {
    /// Run a command against the block sequence
    ///
    /// Every branch validates before it mutates, so an `Err` means the
    /// document is unchanged. Version and selection are filled in by `apply`.
    pub(crate) fn execute(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        match cmd {
            Cmd::InsertBlock {
                block_type,
                at,
                payload,
            } => {
                let id = self.insert_new(block_type, at, payload);
                Ok(self.inserted_patch(vec![id]))
            }
            Cmd::UpdateBlock { id, patch } => {
                let words_per_minute = self.settings.words_per_minute;
                let stats = patch
                    .text_source()
                    .map(|text| words::estimate_with_rate(text, words_per_minute));
                let block = self.block_mut(id)?;
                let ignored = block.data.merge(patch);
                if !ignored.is_empty() {
                    log::debug!(
                        "ignoring {ignored:?} on {} block {id}",
                        block.block_type()
                    );
                }
                if let Some(stats) = stats {
                    block.metadata.word_count = stats.word_count;
                    block.metadata.reading_time = stats.reading_time;
                }
                Ok(changed(id))
            }
            Cmd::DeleteBlock { id } => self.delete_block(id),
            Cmd::MoveBlock { from, to } => self.move_block_to(from, to),
            Cmd::DuplicateBlock { id } => {
                let index = self.require_index(id)?;
                // same as a fresh insert: statistics start at zero
                let copy = Block::new(self.blocks[index].data.clone());
                let new_id = self.insert_block(copy, InsertAt::Index(index + 1));
                Ok(self.inserted_patch(vec![new_id]))
            }
            Cmd::FanOut { after, contents } => {
                let index = self.require_index(after)?;
                let ids: Vec<BlockId> = contents
                    .into_iter()
                    .enumerate()
                    .map(|(offset, html)| {
                        let block = Block::new(BlockData::paragraph(html));
                        let id = block.id;
                        self.blocks.insert(index + 1 + offset, block);
                        id
                    })
                    .collect();
                if let Some(last) = ids.last() {
                    self.focus(*last, FocusTarget::Content, self.settings.focus_delay);
                }
                Ok(self.inserted_patch(ids))
            }
            Cmd::AddTableRow { id, after } => {
                self.table_mut(id)?.add_row(after);
                Ok(changed(id))
            }
            Cmd::AddTableColumn { id, after } => {
                self.table_mut(id)?.add_column(after);
                Ok(changed(id))
            }
            Cmd::RemoveTableRow { id, row } => {
                self.table_mut(id)?.remove_row(row)?;
                Ok(changed(id))
            }
            Cmd::RemoveTableColumn { id, col } => {
                self.table_mut(id)?.remove_column(col)?;
                Ok(changed(id))
            }
            Cmd::SetTableCell {
                id,
                row,
                col,
                value,
            } => {
                self.table_mut(id)?.set_cell(row, col, value)?;
                Ok(changed(id))
            }
            Cmd::TabFromCell {
                id,
                row,
                col,
                backwards,
            } => self.tab_from_cell(id, row, col, backwards),
            Cmd::SetListItem { id, index, value } => {
                let items = self.list_items_mut(id)?;
                let len = items.len();
                let item = items
                    .get_mut(index)
                    .ok_or(EditError::IndexOutOfRange { index, len })?;
                *item = value;
                Ok(changed(id))
            }
            Cmd::InsertListItem { id, after } => {
                let items = self.list_items_mut(id)?;
                let at = (after + 1).min(items.len());
                items.insert(at, String::new());
                let mut patch = changed(id);
                patch.focus = Some(self.focus(
                    id,
                    FocusTarget::ListItem(at),
                    self.settings.focus_delay,
                ));
                Ok(patch)
            }
            Cmd::RemoveListItem { id, index } => {
                let items = self.list_items_mut(id)?;
                let len = items.len();
                if index >= len {
                    return Err(EditError::IndexOutOfRange { index, len });
                }
                if len == 1 {
                    items[0].clear();
                } else {
                    items.remove(index);
                }
                Ok(changed(id))
            }
            Cmd::SetEmbed { id, descriptor } => {
                let block = self.block_mut(id)?;
                let found = block.block_type();
                let BlockData::Embed {
                    url,
                    embed_type,
                    embed_id,
                    full_url,
                } = &mut block.data
                else {
                    return Err(EditError::WrongBlockType {
                        id,
                        expected: BlockType::Embed,
                        found,
                    });
                };
                url.clone_from(&descriptor.normalized_url);
                *full_url = descriptor.normalized_url;
                *embed_type = descriptor.service;
                *embed_id = descriptor.id;
                Ok(changed(id))
            }
        }
    }

    /// Insert a default block, overlaid with `payload`, and select it
    pub(crate) fn insert_new(
        &mut self,
        block_type: BlockType,
        at: InsertAt,
        payload: Option<BlockPatch>,
    ) -> BlockId {
        let mut data = BlockData::default_for(block_type);
        if let Some(payload) = payload {
            let ignored = data.merge(payload);
            if !ignored.is_empty() {
                log::debug!("ignoring {ignored:?} on new {block_type} block");
            }
        }
        self.insert_block(Block::new(data), at)
    }

    fn insert_block(&mut self, block: Block, at: InsertAt) -> BlockId {
        let id = block.id;
        let index = at.resolve(self.blocks.len());
        self.blocks.insert(index, block);
        self.focus(id, FocusTarget::Content, self.settings.focus_delay);
        id
    }

    fn focus(&mut self, id: BlockId, target: FocusTarget, delay: Duration) -> FocusRequest {
        self.selection.select_and_focus(id, target, delay)
    }

    fn inserted_patch(&self, inserted: Vec<BlockId>) -> Patch {
        Patch {
            inserted,
            focus: self.selection.pending_focus().copied(),
            ..Patch::default()
        }
    }

    fn delete_block(&mut self, id: BlockId) -> Result<Patch, EditError> {
        let index = self.require_index(id)?;
        self.selection.forget(id);

        if self.blocks.len() == 1 {
            let replacement = Block::empty_paragraph();
            let replacement_id = replacement.id;
            self.blocks[0] = replacement;
            self.selection.select(replacement_id);
            return Ok(Patch {
                removed: vec![id],
                inserted: vec![replacement_id],
                ..Patch::default()
            });
        }

        self.blocks.remove(index);
        let neighbour = self.blocks[index.saturating_sub(1)].id;
        self.selection.select(neighbour);
        Ok(Patch {
            removed: vec![id],
            ..Patch::default()
        })
    }

    fn move_block_to(&mut self, from: usize, to: usize) -> Result<Patch, EditError> {
        // drop coordinates can be off by one at the edges
        let last = self.blocks.len() - 1;
        let (from, to) = (from.min(last), to.min(last));
        if from == to {
            return Ok(Patch::default());
        }
        let block = self.blocks.remove(from);
        let id = block.id;
        self.blocks.insert(to, block);
        Ok(changed(id))
    }

    fn tab_from_cell(
        &mut self,
        id: BlockId,
        row: usize,
        col: usize,
        backwards: bool,
    ) -> Result<Patch, EditError> {
        let focus_delay = self.settings.focus_delay;
        let table = self.table_mut(id)?;
        if table.cell(row, col).is_none() {
            return Err(EditError::IndexOutOfRange {
                index: row,
                len: table.row_count(),
            });
        }

        let (target, appended) = if backwards {
            match table.prev_cell(row, col) {
                Some((row, col)) => ((row, col), false),
                None => return Ok(Patch::default()),
            }
        } else {
            match table.next_cell(row, col) {
                CellStep::Move { row, col } => ((row, col), false),
                CellStep::AppendRow { row, col } => {
                    table.add_row(Some(row - 1));
                    ((row, col), true)
                }
            }
        };

        let delay = if appended { focus_delay } else { Duration::ZERO };
        let focus = self.focus(
            id,
            FocusTarget::Cell {
                row: target.0,
                col: target.1,
            },
            delay,
        );
        let mut patch = if appended {
            changed(id)
        } else {
            Patch::default()
        };
        patch.focus = Some(focus);
        Ok(patch)
    }

    pub(crate) fn require_index(&self, id: BlockId) -> Result<usize, EditError> {
        self.index_of(id).ok_or(EditError::NotFound(id))
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut Block, EditError> {
        self.blocks
            .iter_mut()
            .find(|block| block.id == id)
            .ok_or(EditError::NotFound(id))
    }

    fn table_mut(&mut self, id: BlockId) -> Result<&mut TableGrid, EditError> {
        let block = self.block_mut(id)?;
        let found = block.block_type();
        match &mut block.data {
            BlockData::Table { table } => Ok(table),
            _ => Err(EditError::WrongBlockType {
                id,
                expected: BlockType::Table,
                found,
            }),
        }
    }

    fn list_items_mut(&mut self, id: BlockId) -> Result<&mut Vec<String>, EditError> {
        let block = self.block_mut(id)?;
        let found = block.block_type();
        match &mut block.data {
            BlockData::List { items, .. } => Ok(items),
            _ => Err(EditError::WrongBlockType {
                id,
                expected: BlockType::List,
                found,
            }),
        }
    }
}

fn changed(id: BlockId) -> Patch {
    Patch {
        changed: vec![id],
        ..Patch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-1, InsertAt::End)]
    #[case(-5, InsertAt::Index(0))]
    #[case(0, InsertAt::Index(0))]
    #[case(3, InsertAt::Index(3))]
    fn test_insert_at_from_signed(#[case] raw: i64, #[case] expected: InsertAt) {
        assert_eq!(InsertAt::from_signed(raw), expected);
    }

    #[test]
    fn test_insert_at_resolves_within_bounds() {
        assert_eq!(InsertAt::Index(10).resolve(3), 3);
        assert_eq!(InsertAt::Index(1).resolve(3), 1);
        assert_eq!(InsertAt::End.resolve(3), 3);
    }
}
