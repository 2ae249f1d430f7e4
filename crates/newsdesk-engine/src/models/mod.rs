pub mod block;
pub mod embed;
pub mod library;
pub mod table;

pub use block::{
    Alignment, Block, BlockData, BlockId, BlockPatch, BlockType, HeadingLevel, ListStyle,
    Metadata,
};
pub use embed::{EmbedDescriptor, EmbedResolver, EmbedService, KnownServices};
pub use table::{CellStep, TableGrid, TableShapeError};
