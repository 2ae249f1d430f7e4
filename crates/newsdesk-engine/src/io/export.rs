//! Conversion of a document into the versioned block-JSON interchange format
//!
//! The output is what downstream publishing systems ingest: a timestamp, the
//! schema version string and one `{id, type, data}` object per block, with
//! `data` reshaped per block type.

use serde::Serialize;

use crate::editing::Document;
use crate::models::{Block, BlockData, BlockType, EmbedService, ListStyle};

/// Schema version stamped on every export
pub const SCHEMA_VERSION: &str = "2.29.1";

const DEFAULT_EMBED_WIDTH: u32 = 580;
const DEFAULT_EMBED_HEIGHT: u32 = 320;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedDocument {
    /// Export time, epoch milliseconds
    pub time: u64,
    pub version: String,
    pub blocks: Vec<ExportedBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub data: ExportedData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFile {
    pub url: String,
}

/// Per-type `data` object of an exported block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportedData {
    Heading {
        text: String,
        level: u8,
    },
    Quote {
        text: String,
        caption: String,
    },
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        file: ImageFile,
        caption: String,
        with_border: bool,
        with_background: bool,
        stretched: bool,
    },
    List {
        #[serde(rename = "type")]
        style: ListStyle,
        items: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Embed {
        service: String,
        source: String,
        embed: String,
        width: u32,
        height: u32,
        caption: String,
        embed_id: String,
    },
    Table {
        table: Vec<Vec<String>>,
    },
    Html {
        html: String,
    },
    Empty {},
}

/// Builds [`ExportedDocument`]s
///
/// The schema version and embed frame size come from host configuration;
/// `Default` uses the values publishing systems expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exporter {
    pub version: String,
    pub embed_width: u32,
    pub embed_height: u32,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            embed_width: DEFAULT_EMBED_WIDTH,
            embed_height: DEFAULT_EMBED_HEIGHT,
        }
    }
}

impl Exporter {
    /// Export stamped with the current time
    pub fn export(&self, doc: &Document) -> ExportedDocument {
        self.export_at(doc, crate::models::block::now_millis())
    }

    /// Export stamped with `time`; the same document and time always give
    /// the same output
    pub fn export_at(&self, doc: &Document, time: u64) -> ExportedDocument {
        ExportedDocument {
            time,
            version: self.version.clone(),
            blocks: doc
                .blocks()
                .iter()
                .map(|block| self.export_block(block))
                .collect(),
        }
    }

    pub fn export_block(&self, block: &Block) -> ExportedBlock {
        ExportedBlock {
            id: block.id().to_string(),
            block_type: block.block_type(),
            data: self.shape(block.data()),
        }
    }

    fn shape(&self, data: &BlockData) -> ExportedData {
        match data {
            BlockData::Paragraph { html, .. } => ExportedData::Text { text: html.clone() },
            BlockData::Heading { html, level, .. } => ExportedData::Heading {
                text: html.clone(),
                level: (*level).into(),
            },
            BlockData::Quote { text, citation } => ExportedData::Quote {
                text: text.clone(),
                caption: citation.clone(),
            },
            BlockData::Image { url, caption, .. } => ExportedData::Image {
                file: ImageFile { url: url.clone() },
                caption: caption.clone(),
                with_border: false,
                with_background: false,
                stretched: false,
            },
            BlockData::Embed {
                url,
                embed_type,
                embed_id,
                full_url,
            } => {
                let source = if full_url.is_empty() { url } else { full_url };
                let service = match embed_type {
                    EmbedService::Unresolved => "generic",
                    service => service.as_str(),
                };
                ExportedData::Embed {
                    service: service.to_string(),
                    source: source.clone(),
                    embed: source.clone(),
                    width: self.embed_width,
                    height: self.embed_height,
                    caption: String::new(),
                    embed_id: embed_id.clone(),
                }
            }
            BlockData::Divider {} => ExportedData::Empty {},
            BlockData::RawHtml { html } => ExportedData::Html { html: html.clone() },
            BlockData::List { style, items } => ExportedData::List {
                style: *style,
                items: items.clone(),
            },
            BlockData::Table { table } => ExportedData::Table {
                table: table.rows().to_vec(),
            },
        }
    }
}

/// Export with default settings at the current time
pub fn export(doc: &Document) -> ExportedDocument {
    Exporter::default().export(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Cmd, InsertAt};
    use crate::models::{BlockPatch, HeadingLevel, KnownServices};

    fn exported_data(doc: &Document, index: usize) -> String {
        let block = &doc.blocks()[index];
        serde_json::to_string(&Exporter::default().export_block(block).data).unwrap()
    }

    fn doc_with(block_type: BlockType, patch: BlockPatch) -> Document {
        let mut doc = Document::new();
        let id = doc.blocks()[0].id();
        doc.delete(id);
        let id = doc.insert(block_type, InsertAt::Index(0), None);
        doc.update(id, patch);
        let placeholder = doc.blocks()[1].id();
        doc.delete(placeholder);
        doc
    }

    #[test]
    fn test_paragraph_shape() {
        let doc = doc_with(BlockType::Paragraph, BlockPatch::html("Hi <b>there</b>"));
        insta::assert_snapshot!(exported_data(&doc, 0), @r#"{"text":"Hi <b>there</b>"}"#);
    }

    #[test]
    fn test_heading_shape() {
        let doc = doc_with(
            BlockType::Heading,
            BlockPatch {
                html: Some("Title".to_string()),
                level: Some(HeadingLevel::H4),
                ..BlockPatch::default()
            },
        );
        insta::assert_snapshot!(exported_data(&doc, 0), @r#"{"text":"Title","level":4}"#);
    }

    #[test]
    fn test_quote_shape() {
        let doc = doc_with(
            BlockType::Quote,
            BlockPatch {
                text: Some("Words".to_string()),
                citation: Some("Someone".to_string()),
                ..BlockPatch::default()
            },
        );
        insta::assert_snapshot!(exported_data(&doc, 0), @r#"{"text":"Words","caption":"Someone"}"#);
    }

    #[test]
    fn test_image_shape() {
        let doc = doc_with(
            BlockType::Image,
            BlockPatch {
                url: Some("https://cdn.example.com/a.jpg".to_string()),
                alt: Some("alt".to_string()),
                caption: Some("A caption".to_string()),
                ..BlockPatch::default()
            },
        );
        insta::assert_snapshot!(
            exported_data(&doc, 0),
            @r#"{"file":{"url":"https://cdn.example.com/a.jpg"},"caption":"A caption","withBorder":false,"withBackground":false,"stretched":false}"#
        );
    }

    #[test]
    fn test_unresolved_embed_is_generic() {
        let doc = doc_with(
            BlockType::Embed,
            BlockPatch {
                url: Some("https://example.com/v".to_string()),
                ..BlockPatch::default()
            },
        );
        insta::assert_snapshot!(
            exported_data(&doc, 0),
            @r#"{"service":"generic","source":"https://example.com/v","embed":"https://example.com/v","width":580,"height":320,"caption":"","embedId":""}"#
        );
    }

    #[test]
    fn test_resolved_embed_shape() {
        let mut doc = doc_with(BlockType::Embed, BlockPatch::default());
        let id = doc.blocks()[0].id();
        doc.embed_url(id, "https://x.com/someone/status/99", &KnownServices)
            .unwrap();

        insta::assert_snapshot!(
            exported_data(&doc, 0),
            @r#"{"service":"twitter","source":"https://x.com/someone/status/99","embed":"https://x.com/someone/status/99","width":580,"height":320,"caption":"","embedId":"99"}"#
        );
    }

    #[test]
    fn test_divider_list_table_and_raw_html_shapes() {
        let mut doc = doc_with(BlockType::Divider, BlockPatch::default());
        insta::assert_snapshot!(exported_data(&doc, 0), @"{}");

        let list = doc.insert(BlockType::List, InsertAt::End, None);
        doc.apply(Cmd::SetListItem {
            id: list,
            index: 0,
            value: "one".to_string(),
        });
        insta::assert_snapshot!(exported_data(&doc, 1), @r#"{"type":"unordered","items":["one"]}"#);

        doc.insert(BlockType::Table, InsertAt::End, None);
        insta::assert_snapshot!(exported_data(&doc, 2), @r#"{"table":[["",""],["",""]]}"#);

        let raw = doc.insert(BlockType::RawHtml, InsertAt::End, None);
        doc.update(raw, BlockPatch::html("<iframe></iframe>"));
        insta::assert_snapshot!(exported_data(&doc, 3), @r#"{"html":"<iframe></iframe>"}"#);
    }

    #[test]
    fn test_export_is_deterministic_for_a_fixed_time() {
        let doc = doc_with(BlockType::Paragraph, BlockPatch::html("same"));
        let exporter = Exporter::default();

        assert_eq!(exporter.export_at(&doc, 7), exporter.export_at(&doc, 7));
    }

    #[test]
    fn test_top_level_field_order() {
        let doc = Document::new();
        let id = doc.blocks()[0].id();
        let json = serde_json::to_string(&Exporter::default().export_at(&doc, 1)).unwrap();

        assert_eq!(
            json,
            format!(
                r#"{{"time":1,"version":"2.29.1","blocks":[{{"id":"{id}","type":"paragraph","data":{{"text":""}}}}]}}"#
            )
        );
    }

    #[test]
    fn test_configured_exporter() {
        let exporter = Exporter {
            version: "3.0.0".to_string(),
            embed_width: 640,
            embed_height: 360,
        };
        let doc = doc_with(BlockType::Embed, BlockPatch::default());

        let exported = exporter.export_at(&doc, 0);

        assert_eq!(exported.version, "3.0.0");
        let ExportedData::Embed { width, height, .. } = &exported.blocks[0].data else {
            panic!("expected embed data");
        };
        assert_eq!((*width, *height), (640, 360));
    }
}
