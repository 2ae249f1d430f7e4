pub mod editing;
pub mod io;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::{
    commands::*, commit::*, document::*, drag::*, paste::*, patch::*, selection::*, snapshot::*,
    EditError,
};
pub use io::export::{export, Exporter, ExportedBlock, ExportedData, ExportedDocument};
pub use io::IoError;
pub use models::*;
