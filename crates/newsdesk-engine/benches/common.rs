// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use newsdesk_engine::editing::{Cmd, Document, InsertAt};
use newsdesk_engine::models::{BlockPatch, BlockType};

#[allow(dead_code)]
pub fn generate_article(sections: usize) -> Document {
    let mut doc = Document::new();
    let first = doc.blocks()[0].id();
    doc.update(first, BlockPatch::html("<b>LONDON</b> - Opening paragraph."));

    for section in 0..sections {
        let heading = doc.insert(BlockType::Heading, InsertAt::End, None);
        doc.update(heading, BlockPatch::html(format!("Section {section}")));
        for paragraph in 0..4 {
            let id = doc.insert(BlockType::Paragraph, InsertAt::End, None);
            doc.update(
                id,
                BlockPatch::html(format!(
                    "Paragraph {paragraph} of section {section} with <i>some</i> inline markup and enough words to count."
                )),
            );
        }
        let table = doc.insert(BlockType::Table, InsertAt::End, None);
        doc.apply(Cmd::AddTableRow {
            id: table,
            after: Some(1),
        });
        doc.insert(BlockType::Divider, InsertAt::End, None);
    }

    doc
}

#[allow(dead_code)]
pub fn generate_clipboard_html(paragraphs: usize) -> String {
    let mut html = String::from("<html><body><!--StartFragment-->");
    for index in 0..paragraphs {
        html.push_str(&format!(
            "<p class=MsoNormal style='margin:0cm'><span lang=EN-GB>Paragraph&nbsp;{index} <b>bold</b></span><o:p></o:p></p>\n"
        ));
    }
    html.push_str("<!--EndFragment--></body></html>");
    html
}
