use thiserror::Error;

use crate::models::{BlockId, BlockType, TableShapeError};

/// Why a command was not applied
///
/// The store never surfaces these as failures from `apply`; they are recorded
/// on the returned [`Patch`](crate::editing::Patch) and the document is left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no block with id {0}")]
    NotFound(BlockId),
    #[error("block {id} is a {found} block, expected {expected}")]
    WrongBlockType {
        id: BlockId,
        expected: BlockType,
        found: BlockType,
    },
    #[error("unsupported embed URL: {0}")]
    UnrecognizedEmbedUrl(String),
    #[error("invalid table shape: {0}")]
    InvalidTableShape(#[from] TableShapeError),
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
