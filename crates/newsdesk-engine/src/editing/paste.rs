use crate::editing::{Cmd, Document, Patch};
use crate::models::BlockId;
use crate::parsing::clipboard::{self, MarkupLayout};

/// What the clipboard offered for a paste
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub html: Option<String>,
    pub text: Option<String>,
}

impl ClipboardPayload {
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            html: None,
            text: Some(text.into()),
        }
    }
}

/// Content for the text surface to insert at the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorInsert {
    Html(String),
    Text(String),
}

impl CursorInsert {
    /// The insert as markup, escaping plain text
    pub fn to_html(&self) -> String {
        match self {
            CursorInsert::Html(html) => html.clone(),
            CursorInsert::Text(text) => html_escape::encode_text(text).into_owned(),
        }
    }
}

/// How a paste splits between the caret and new blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PastePlan {
    pub cursor: Option<CursorInsert>,
    /// Markup for paragraphs to create after the active block
    pub overflow: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PasteOutcome {
    /// Nothing usable on the clipboard
    Empty,
    /// The paste needed new blocks but no block was selected; nothing happened
    Aborted,
    Inserted {
        /// Block that was active when the paste happened
        target: Option<BlockId>,
        cursor: CursorInsert,
        /// Present when paragraphs were created after the target
        fan_out: Option<Patch>,
    },
}

/// Decide how a clipboard payload is split, without touching a document
///
/// Rich markup wins over plain text. Markup that cleans down to nothing
/// falls back to the trimmed plain text as a single caret insert.
pub fn plan_paste(payload: &ClipboardPayload) -> PastePlan {
    if let Some(html) = payload.html.as_deref().filter(|html| !html.trim().is_empty()) {
        let cleaned = clipboard::clean_html(html);
        return match clipboard::split_fragments(&cleaned) {
            MarkupLayout::Fragments(mut fragments) => {
                let overflow = fragments.split_off(1);
                PastePlan {
                    cursor: fragments.pop().map(CursorInsert::Html),
                    overflow,
                }
            }
            MarkupLayout::Inline(markup) if !markup.is_empty() => PastePlan {
                cursor: Some(CursorInsert::Html(markup)),
                overflow: Vec::new(),
            },
            MarkupLayout::Inline(_) => {
                log::debug!("clipboard markup is empty after cleaning, using plain text");
                let text = payload.text.as_deref().unwrap_or_default().trim();
                PastePlan {
                    cursor: (!text.is_empty()).then(|| CursorInsert::Text(text.to_string())),
                    overflow: Vec::new(),
                }
            }
        };
    }

    let mut lines = clipboard::plain_lines(payload.text.as_deref().unwrap_or_default()).into_iter();
    let cursor = lines.next().map(CursorInsert::Text);
    let overflow = lines
        .map(|line| html_escape::encode_text(&line).into_owned())
        .collect();
    PastePlan { cursor, overflow }
}

impl Document {
    /// Paste into the selected block
    ///
    /// The first piece is returned for the caret. Any further pieces become
    /// paragraphs after the selected block and the last of them is selected.
    pub fn paste(&mut self, payload: &ClipboardPayload) -> PasteOutcome {
        let plan = plan_paste(payload);
        let Some(cursor) = plan.cursor else {
            return PasteOutcome::Empty;
        };
        let target = self.selected();

        if plan.overflow.is_empty() {
            return PasteOutcome::Inserted {
                target,
                cursor,
                fan_out: None,
            };
        }

        let Some(after) = target else {
            log::debug!(
                "paste of {} paragraphs aborted: no block selected",
                plan.overflow.len() + 1
            );
            return PasteOutcome::Aborted;
        };
        let patch = self.apply(Cmd::FanOut {
            after,
            contents: plan.overflow,
        });
        if patch.rejected.is_some() {
            return PasteOutcome::Aborted;
        }
        PasteOutcome::Inserted {
            target,
            cursor,
            fan_out: Some(patch),
        }
    }
}
