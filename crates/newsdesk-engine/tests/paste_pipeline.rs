use newsdesk_engine::editing::{
    ClipboardPayload, CursorInsert, Document, PasteOutcome, plan_paste,
};
use newsdesk_engine::models::{BlockData, BlockPatch};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/paste/{name}.html",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

/// What a text surface does with a caret insert into an empty block
fn apply_cursor_insert(doc: &mut Document, outcome: &PasteOutcome) {
    if let PasteOutcome::Inserted {
        target: Some(target),
        cursor,
        ..
    } = outcome
    {
        doc.update(*target, BlockPatch::html(cursor.to_html()));
    }
}

fn paragraph_texts(doc: &Document) -> Vec<String> {
    doc.blocks()
        .iter()
        .map(|block| match block.data() {
            BlockData::Paragraph { html, .. } => html.clone(),
            other => panic!("expected only paragraphs, found {other:?}"),
        })
        .collect()
}

#[test]
fn test_plain_text_fans_out_into_paragraphs() {
    // Given a document with one empty, active block
    let mut doc = Document::new();
    let first = doc.blocks()[0].id();
    doc.select(first);

    // When three lines of plain text are pasted
    let outcome = doc.paste(&ClipboardPayload::text("line1\nline2\nline3"));
    apply_cursor_insert(&mut doc, &outcome);

    // Then there are three paragraphs and the last is selected
    assert_eq!(paragraph_texts(&doc), vec!["line1", "line2", "line3"]);
    assert_eq!(doc.selected(), Some(doc.blocks()[2].id()));
}

#[test]
fn test_word_document_paste() {
    let plan = plan_paste(&ClipboardPayload::html(fixture("word_document")));

    assert_eq!(
        plan.cursor,
        Some(CursorInsert::Html("Council approves new budget".to_string()))
    );
    assert_eq!(
        plan.overflow,
        vec![
            "The council voted 7 to 2 on <b>Tuesday</b>.".to_string(),
            "Spending rises by <i>4%</i> next year.".to_string(),
        ]
    );
}

#[test]
fn test_google_docs_paste_looks_through_wrapper() {
    let plan = plan_paste(&ClipboardPayload::html(fixture("google_docs")));

    assert_eq!(
        plan.cursor,
        Some(CursorInsert::Html(
            r#"First paragraph with a <a href="https://example.com/story">link</a>."#.to_string()
        ))
    );
    assert_eq!(plan.overflow, vec!["Second paragraph.".to_string()]);
}

#[test]
fn test_single_block_web_snippet_stays_inline() {
    let mut doc = Document::new();
    let first = doc.blocks()[0].id();
    doc.select(first);

    let outcome = doc.paste(&ClipboardPayload::html(fixture("web_snippet")));

    assert_eq!(
        outcome,
        PasteOutcome::Inserted {
            target: Some(first),
            cursor: CursorInsert::Html(
                "When the <em>storm</em> hit, the harbour was empty.".to_string()
            ),
            fan_out: None,
        }
    );
    assert_eq!(doc.block_count(), 1);
}

#[test]
fn test_rich_paste_into_middle_of_document() {
    // Given a document with paragraphs A and Z, with A active
    let mut doc = Document::new();
    let a = doc.blocks()[0].id();
    let z = doc.insert(
        newsdesk_engine::models::BlockType::Paragraph,
        newsdesk_engine::editing::InsertAt::End,
        Some(BlockPatch::html("Z")),
    );
    doc.select(a);

    // When a Word document is pasted
    let outcome = doc.paste(&ClipboardPayload::html(fixture("word_document")));
    apply_cursor_insert(&mut doc, &outcome);

    // Then the overflow lands between A and Z
    assert_eq!(
        paragraph_texts(&doc),
        vec![
            "Council approves new budget",
            "The council voted 7 to 2 on <b>Tuesday</b>.",
            "Spending rises by <i>4%</i> next year.",
            "Z",
        ]
    );
    assert_eq!(doc.index_of(z), Some(3));
    assert_eq!(doc.selected(), Some(doc.blocks()[2].id()));
    assert_eq!(doc.get(a).unwrap().metadata().word_count, 4);
}

#[test]
fn test_fan_out_without_selection_changes_nothing() {
    let mut doc = Document::new();
    doc.clear_selection();
    let before = doc.snapshot();

    let outcome = doc.paste(&ClipboardPayload::html(fixture("word_document")));

    assert_eq!(outcome, PasteOutcome::Aborted);
    assert_eq!(doc.snapshot(), before);
}
