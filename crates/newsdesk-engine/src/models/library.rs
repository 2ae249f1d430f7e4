//! Catalog of insertable block types, grouped the way the editor sidebar shows them

use crate::models::block::BlockType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryEntry {
    pub block_type: BlockType,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibrarySection {
    pub title: &'static str,
    /// Shown even when a search matches nothing in it
    pub always_show: bool,
    pub entries: &'static [LibraryEntry],
}

const fn entry(
    block_type: BlockType,
    label: &'static str,
    description: &'static str,
) -> LibraryEntry {
    LibraryEntry {
        block_type,
        label,
        description,
    }
}

pub const SECTIONS: &[LibrarySection] = &[
    LibrarySection {
        title: "Common",
        always_show: true,
        entries: &[
            entry(BlockType::Paragraph, "Paragraph", "Basic text content"),
            entry(BlockType::Heading, "Heading", "Section headings (H3-H4)"),
            entry(BlockType::Image, "Image", "Upload or embed images"),
            entry(BlockType::List, "List", "Ordered and unordered lists"),
        ],
    },
    LibrarySection {
        title: "Text",
        always_show: false,
        entries: &[entry(BlockType::Quote, "Quote", "Blockquote with citation")],
    },
    LibrarySection {
        title: "Media",
        always_show: false,
        entries: &[entry(
            BlockType::Embed,
            "Embed",
            "YouTube, Twitter, Instagram, Threads",
        )],
    },
    LibrarySection {
        title: "Structure",
        always_show: false,
        entries: &[
            entry(BlockType::Table, "Table", "Data tables"),
            entry(BlockType::Divider, "Divider", "Horizontal separator"),
        ],
    },
    LibrarySection {
        title: "Advanced",
        always_show: false,
        entries: &[entry(BlockType::RawHtml, "Raw HTML", "Custom HTML code")],
    },
];

const QUICK_INSERT: [BlockType; 6] = [
    BlockType::Paragraph,
    BlockType::Heading,
    BlockType::Image,
    BlockType::List,
    BlockType::Quote,
    BlockType::Embed,
];

/// A section with the entries that survived a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    pub title: &'static str,
    pub entries: Vec<&'static LibraryEntry>,
}

/// Filter the catalog by a case-insensitive substring of label or description
///
/// A blank term returns every section. Sections left without entries are
/// dropped unless they are always shown.
pub fn search(term: &str) -> Vec<SectionMatch> {
    let needle = term.trim().to_lowercase();
    SECTIONS
        .iter()
        .filter_map(|section| {
            let entries: Vec<_> = section
                .entries
                .iter()
                .filter(|entry| {
                    needle.is_empty()
                        || entry.label.to_lowercase().contains(&needle)
                        || entry.description.to_lowercase().contains(&needle)
                })
                .collect();
            (section.always_show || !entries.is_empty()).then_some(SectionMatch {
                title: section.title,
                entries,
            })
        })
        .collect()
}

/// Short list offered by the inline "+" inserter between blocks
pub fn quick_insert() -> &'static [BlockType] {
    &QUICK_INSERT
}

pub fn entry_for(block_type: BlockType) -> Option<&'static LibraryEntry> {
    SECTIONS
        .iter()
        .flat_map(|section| section.entries.iter())
        .find(|entry| entry.block_type == block_type)
}
