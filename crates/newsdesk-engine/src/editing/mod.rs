/*!
 * # Editing Core
 *
 * The document engine behind the article editor. Hosts render from
 * snapshots and send every change back as a command.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the block sequence
 * - A [`Document`] owns an ordered `Vec<Block>`; it is never empty
 * - Each block has a stable [`BlockId`](crate::models::BlockId) assigned at creation
 * - Payloads are typed per block kind, so a block's type always matches its data
 *
 * ### 2. Command-Based Editing
 * - All mutations are [`Cmd`] values applied through [`Document::apply`]
 * - Applying never fails; a refused command comes back as a [`Patch`] with
 *   `rejected` set and the document untouched
 * - The document version increments on every command that changed something
 *
 * ### 3. Selection and Focus
 * - At most one block is selected; selection never changes block content
 * - Structural edits leave a [`FocusRequest`] that the host takes once and
 *   honours after the requested delay
 *
 * ### 4. Input Pipelines
 * - [`CommitBuffer`] debounces keystrokes into update commands
 * - [`Document::paste`] cleans clipboard markup and fans multi-paragraph
 *   pastes out into new blocks
 * - [`DragSession`] turns drag gestures into insert or move commands
 *
 * ### 5. Read API: Snapshots
 * - [`Document::snapshot`] returns an owned [`Snapshot`]; no caller can hold
 *   a mutable reference into the store
 *
 * ## Usage Pattern
 *
 * ```rust
 * use newsdesk_engine::editing::*;
 * use newsdesk_engine::models::{BlockPatch, BlockType};
 *
 * let mut doc = Document::new();
 * let first = doc.blocks()[0].id();
 *
 * // 1. Edit through commands
 * doc.update(first, BlockPatch::html("Opening line"));
 * let quote = doc.insert(BlockType::Quote, InsertAt::End, None);
 *
 * // 2. The host moves focus when asked
 * let focus = doc.take_focus_request().unwrap();
 * assert_eq!(focus.block_id, quote);
 *
 * // 3. Render from a snapshot
 * let snapshot = doc.snapshot();
 * assert_eq!(snapshot.blocks.len(), 2);
 * ```
 */

pub mod commands;
pub mod commit;
pub mod document;
pub mod drag;
pub mod error;
pub mod paste;
pub mod patch;
pub mod selection;
pub mod snapshot;

// Public API re-exports
pub use commands::{Cmd, InsertAt};
pub use commit::CommitBuffer;
pub use document::{Document, EditorSettings, Key, KeyOutcome, KeyPress, TextDirection};
pub use drag::{DragSession, DragState};
pub use error::EditError;
pub use paste::{ClipboardPayload, CursorInsert, PasteOutcome, PastePlan, plan_paste};
pub use patch::Patch;
pub use selection::{FocusRequest, FocusTarget, Selection};
pub use snapshot::Snapshot;
