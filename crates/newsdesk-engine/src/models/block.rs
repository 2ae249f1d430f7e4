use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::embed::EmbedService;
use crate::models::table::TableGrid;

const ID_PREFIX: &str = "block-";

/// Unique identifier for a block
///
/// Assigned once when the block is constructed and never reused, even after
/// the block is deleted.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BlockId(Uuid);

impl BlockId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the `block-<uuid>` form produced by `Display`
    pub fn parse(value: &str) -> Option<Self> {
        let raw = value.strip_prefix(ID_PREFIX)?;
        Uuid::try_parse(raw).ok().map(Self)
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0.simple())
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({self})")
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for BlockId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid block id: {value}"))
    }
}

/// The closed set of block variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    Heading,
    Image,
    Quote,
    List,
    Embed,
    Table,
    Divider,
    RawHtml,
}

impl BlockType {
    pub const ALL: [BlockType; 9] = [
        BlockType::Paragraph,
        BlockType::Heading,
        BlockType::Image,
        BlockType::Quote,
        BlockType::List,
        BlockType::Embed,
        BlockType::Table,
        BlockType::Divider,
        BlockType::RawHtml,
    ];

    /// Wire name used in the exported document
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Heading => "heading",
            BlockType::Image => "image",
            BlockType::Quote => "quote",
            BlockType::List => "list",
            BlockType::Embed => "embed",
            BlockType::Table => "table",
            BlockType::Divider => "divider",
            BlockType::RawHtml => "raw-html",
        }
    }

    /// Patch fields that apply to this variant's payload
    pub fn patch_fields(self) -> &'static [&'static str] {
        match self {
            BlockType::Paragraph => &["html", "alignment"],
            BlockType::Heading => &["html", "level", "alignment"],
            BlockType::Image => &["url", "alt", "caption"],
            BlockType::Quote => &["text", "citation"],
            BlockType::List => &["type", "items"],
            BlockType::Embed => &["url", "embedType", "embedId", "fullUrl"],
            BlockType::Table => &["table"],
            BlockType::Divider => &[],
            BlockType::RawHtml => &["html"],
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

/// Heading levels available to article bodies (H3 and H4)
///
/// Any other numeric level is clamped into range on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum HeadingLevel {
    #[default]
    H3,
    H4,
}

impl From<u8> for HeadingLevel {
    fn from(level: u8) -> Self {
        if level >= 4 {
            HeadingLevel::H4
        } else {
            HeadingLevel::H3
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    Unordered,
}

/// Variant-specific payload of a block
///
/// The variant is the block's type, so a block can never carry a payload
/// shaped for a different type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum BlockData {
    Paragraph {
        html: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<Alignment>,
    },
    Heading {
        html: String,
        #[serde(default)]
        level: HeadingLevel,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<Alignment>,
    },
    Image {
        url: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        caption: String,
    },
    Quote {
        text: String,
        #[serde(default)]
        citation: String,
    },
    List {
        #[serde(rename = "type", default)]
        style: ListStyle,
        items: Vec<String>,
    },
    Embed {
        url: String,
        #[serde(rename = "embedType", default)]
        embed_type: EmbedService,
        #[serde(rename = "embedId", default)]
        embed_id: String,
        #[serde(rename = "fullUrl", default)]
        full_url: String,
    },
    Table {
        table: TableGrid,
    },
    Divider {},
    RawHtml {
        html: String,
    },
}

impl BlockData {
    /// Zero-value payload for a block type
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Paragraph => BlockData::Paragraph {
                html: String::new(),
                alignment: None,
            },
            BlockType::Heading => BlockData::Heading {
                html: String::new(),
                level: HeadingLevel::H3,
                alignment: None,
            },
            BlockType::Image => BlockData::Image {
                url: String::new(),
                alt: String::new(),
                caption: String::new(),
            },
            BlockType::Quote => BlockData::Quote {
                text: String::new(),
                citation: String::new(),
            },
            BlockType::List => BlockData::List {
                style: ListStyle::Unordered,
                items: vec![String::new()],
            },
            BlockType::Embed => BlockData::Embed {
                url: String::new(),
                embed_type: EmbedService::Unresolved,
                embed_id: String::new(),
                full_url: String::new(),
            },
            BlockType::Table => BlockData::Table {
                table: TableGrid::default(),
            },
            BlockType::Divider => BlockData::Divider {},
            BlockType::RawHtml => BlockData::RawHtml {
                html: String::new(),
            },
        }
    }

    /// Convenience constructor for a paragraph holding `html`
    pub fn paragraph(html: impl Into<String>) -> Self {
        BlockData::Paragraph {
            html: html.into(),
            alignment: None,
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockData::Paragraph { .. } => BlockType::Paragraph,
            BlockData::Heading { .. } => BlockType::Heading,
            BlockData::Image { .. } => BlockType::Image,
            BlockData::Quote { .. } => BlockType::Quote,
            BlockData::List { .. } => BlockType::List,
            BlockData::Embed { .. } => BlockType::Embed,
            BlockData::Table { .. } => BlockType::Table,
            BlockData::Divider {} => BlockType::Divider,
            BlockData::RawHtml { .. } => BlockType::RawHtml,
        }
    }

    /// Shallow-merge a patch into this payload
    ///
    /// Fields present in the patch overwrite the payload's fields, empty
    /// strings included. Returns the names of patch fields that do not
    /// belong to this variant and were therefore dropped.
    pub(crate) fn merge(&mut self, patch: BlockPatch) -> Vec<&'static str> {
        let accepted = self.block_type().patch_fields();
        let ignored = patch
            .present_fields()
            .into_iter()
            .filter(|field| !accepted.contains(field))
            .collect();

        let BlockPatch {
            html: new_html,
            text: new_text,
            alignment: new_alignment,
            level: new_level,
            url: new_url,
            alt: new_alt,
            caption: new_caption,
            citation: new_citation,
            list_style: new_style,
            items: new_items,
            embed_type: new_embed_type,
            embed_id: new_embed_id,
            full_url: new_full_url,
            table: new_table,
        } = patch;

        match self {
            BlockData::Paragraph { html, alignment } => {
                overwrite(html, new_html);
                if new_alignment.is_some() {
                    *alignment = new_alignment;
                }
            }
            BlockData::Heading {
                html,
                level,
                alignment,
            } => {
                overwrite(html, new_html);
                overwrite(level, new_level);
                if new_alignment.is_some() {
                    *alignment = new_alignment;
                }
            }
            BlockData::Image { url, alt, caption } => {
                overwrite(url, new_url);
                overwrite(alt, new_alt);
                overwrite(caption, new_caption);
            }
            BlockData::Quote { text, citation } => {
                overwrite(text, new_text);
                overwrite(citation, new_citation);
            }
            BlockData::List { style, items } => {
                overwrite(style, new_style);
                overwrite(items, new_items);
            }
            BlockData::Embed {
                url,
                embed_type,
                embed_id,
                full_url,
            } => {
                overwrite(url, new_url);
                overwrite(embed_type, new_embed_type);
                overwrite(embed_id, new_embed_id);
                overwrite(full_url, new_full_url);
            }
            BlockData::Table { table } => overwrite(table, new_table),
            BlockData::Divider {} => {}
            BlockData::RawHtml { html } => overwrite(html, new_html),
        }

        ignored
    }
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Partial payload for an update
///
/// Every field is optional. Serialised with the same camelCase keys as the
/// payload itself so hosts can forward JSON fragments verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `None` leaves the current alignment; a patch cannot clear it back to unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<HeadingLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub list_style: Option<ListStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_type: Option<EmbedService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableGrid>,
}

impl BlockPatch {
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set an explicit alignment
    ///
    /// Alignment only ever moves between explicit values once set: there is
    /// no patch that returns a block to the unset default.
    pub fn alignment(alignment: Alignment) -> Self {
        Self {
            alignment: Some(alignment),
            ..Self::default()
        }
    }

    /// The text-bearing field word counts are derived from: `html`, else `text`
    pub fn text_source(&self) -> Option<&str> {
        self.html.as_deref().or(self.text.as_deref())
    }

    /// Wire names of the fields this patch sets
    pub fn present_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("html", self.html.is_some()),
            ("text", self.text.is_some()),
            ("alignment", self.alignment.is_some()),
            ("level", self.level.is_some()),
            ("url", self.url.is_some()),
            ("alt", self.alt.is_some()),
            ("caption", self.caption.is_some()),
            ("citation", self.citation.is_some()),
            ("type", self.list_style.is_some()),
            ("items", self.items.is_some()),
            ("embedType", self.embed_type.is_some()),
            ("embedId", self.embed_id.is_some()),
            ("fullUrl", self.full_url.is_some()),
            ("table", self.table.is_some()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }
}

/// Derived per-block statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Creation time, epoch milliseconds
    pub created: u64,
    pub word_count: usize,
    /// Minutes
    pub reading_time: usize,
}

/// One typed content unit of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub(crate) id: BlockId,
    #[serde(flatten)]
    pub(crate) data: BlockData,
    pub(crate) metadata: Metadata,
}

impl Block {
    /// Build a block with a fresh id and zeroed statistics
    pub(crate) fn new(data: BlockData) -> Self {
        Self {
            id: BlockId::new(),
            data,
            metadata: Metadata {
                created: now_millis(),
                word_count: 0,
                reading_time: 0,
            },
        }
    }

    pub(crate) fn empty_paragraph() -> Self {
        Self::new(BlockData::default_for(BlockType::Paragraph))
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.data.block_type()
    }

    pub fn data(&self) -> &BlockData {
        &self.data
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Current time as epoch milliseconds (0 if the clock is before the epoch)
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
