use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::editing::{Cmd, EditError, FocusRequest, InsertAt, Patch, Selection, Snapshot};
use crate::models::{Block, BlockId, BlockPatch, BlockType, EmbedResolver};
use crate::parsing::words::DEFAULT_WORDS_PER_MINUTE;

/// Writing direction of the article body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn toggled(self) -> Self {
        match self {
            TextDirection::Ltr => TextDirection::Rtl,
            TextDirection::Rtl => TextDirection::Ltr,
        }
    }
}

/// Host-supplied tuning for the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    pub words_per_minute: usize,
    /// How long after an insert the host should wait before focusing the new block
    pub focus_delay: Duration,
    /// Quiet period before a typing burst is committed
    pub commit_debounce: Duration,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            focus_delay: Duration::from_millis(50),
            commit_debounce: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Other,
}

/// A key press forwarded from a block's editable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// What the store did with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the surface handle the key itself (Shift+Enter inserts a line break)
    PassThrough,
    /// The host must suppress the default action
    Handled { inserted: BlockId },
}

/// Ordered sequence of blocks making up one article
///
/// The document is the single source of truth for block content. Every
/// mutation goes through [`Document::apply`], which never fails: commands
/// that cannot be applied (stale ids, impossible table shapes) leave the
/// document untouched and come back as a [`Patch`] with `rejected` set.
///
/// Invariants held after every command:
/// - the sequence is never empty
/// - block ids are unique
/// - each block's type matches its payload
/// - the selection, when present, refers to an existing block
///
/// ```rust
/// # use newsdesk_engine::editing::{Document, InsertAt};
/// # use newsdesk_engine::models::{BlockPatch, BlockType};
/// let mut doc = Document::new();
/// let heading = doc.insert(BlockType::Heading, InsertAt::Index(0), None);
/// doc.update(heading, BlockPatch::html("Breaking news"));
///
/// assert_eq!(doc.block_count(), 2);
/// assert_eq!(doc.get(heading).unwrap().metadata().word_count, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    pub(crate) selection: Selection,
    /// Incremented on each applied command
    pub(crate) version: u64,
    pub(crate) direction: TextDirection,
    pub(crate) settings: EditorSettings,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding one empty paragraph, nothing selected
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            blocks: vec![Block::empty_paragraph()],
            selection: Selection::default(),
            version: 0,
            direction: TextDirection::default(),
            settings,
        }
    }

    /// Apply a command and describe its effect
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        log::trace!("applying {cmd:?}");
        match self.execute(cmd) {
            Ok(mut patch) => {
                if !patch.is_noop() {
                    self.version += 1;
                }
                patch.version = self.version;
                patch.selection = self.selection.selected();
                patch
            }
            Err(error) => {
                log::debug!("command rejected: {error}");
                Patch::rejected(error, self.selection.selected(), self.version)
            }
        }
    }

    /// Insert a new block and select it
    ///
    /// `payload` is merged over the type's default payload. New blocks start
    /// with zeroed statistics.
    pub fn insert(
        &mut self,
        block_type: BlockType,
        at: InsertAt,
        payload: Option<BlockPatch>,
    ) -> BlockId {
        log::trace!("inserting {block_type} block at {at:?}");
        let id = self.insert_new(block_type, at, payload);
        self.version += 1;
        id
    }

    pub fn update(&mut self, id: BlockId, patch: BlockPatch) -> Patch {
        self.apply(Cmd::UpdateBlock { id, patch })
    }

    /// Remove a block; deleting the last one leaves a fresh empty paragraph
    pub fn delete(&mut self, id: BlockId) -> Patch {
        self.apply(Cmd::DeleteBlock { id })
    }

    pub fn move_block(&mut self, from: usize, to: usize) -> Patch {
        self.apply(Cmd::MoveBlock { from, to })
    }

    /// Copy a block (deep copy, new id) to just after the original
    pub fn duplicate(&mut self, id: BlockId) -> Option<BlockId> {
        self.apply(Cmd::DuplicateBlock { id }).inserted.first().copied()
    }

    /// Enter on a block inserts an empty paragraph after it; Shift+Enter and
    /// every other key pass through to the surface
    pub fn handle_key(&mut self, id: BlockId, key: KeyPress) -> KeyOutcome {
        if key.key != Key::Enter || key.shift {
            return KeyOutcome::PassThrough;
        }
        let Some(index) = self.index_of(id) else {
            log::debug!("enter on unknown block {id}");
            return KeyOutcome::PassThrough;
        };
        let inserted = self.insert(BlockType::Paragraph, InsertAt::Index(index + 1), None);
        KeyOutcome::Handled { inserted }
    }

    /// Resolve `url` and store it on an embed block
    ///
    /// Fails with [`EditError::UnrecognizedEmbedUrl`] when the resolver does not
    /// recognise the URL; the block is left as it was.
    pub fn embed_url(
        &mut self,
        id: BlockId,
        url: &str,
        resolver: &impl EmbedResolver,
    ) -> Result<Patch, EditError> {
        let block = self.get(id).ok_or(EditError::NotFound(id))?;
        if block.block_type() != BlockType::Embed {
            return Err(EditError::WrongBlockType {
                id,
                expected: BlockType::Embed,
                found: block.block_type(),
            });
        }
        let descriptor = resolver
            .resolve(url)
            .ok_or_else(|| EditError::UnrecognizedEmbedUrl(url.to_string()))?;
        let patch = self.apply(Cmd::SetEmbed { id, descriptor });
        if let Some(error) = &patch.rejected {
            return Err(error.clone());
        }
        Ok(patch)
    }

    /// Select a block; unknown ids are ignored
    pub fn select(&mut self, id: BlockId) -> bool {
        if self.index_of(id).is_none() {
            log::debug!("ignoring selection of unknown block {id}");
            return false;
        }
        self.selection.select(id);
        true
    }

    /// Deselect, e.g. on a click outside every block
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selection.selected()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected().and_then(|id| self.get(id))
    }

    /// Hand the pending focus transfer to the host, at most once
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.selection.take_focus_request()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    /// Owned copy of the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            blocks: self.blocks.clone(),
            selection: self.selection.selected(),
            direction: self.direction,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: TextDirection) {
        self.direction = direction;
    }

    pub fn toggle_direction(&mut self) -> TextDirection {
        self.direction = self.direction.toggled();
        self.direction
    }
}
