//! Clipboard markup cleaning and fragment extraction
//!
//! Word processors and web pages put a lot of presentational noise on the
//! clipboard. [`clean_html`] reduces it to bare paragraph/heading markup
//! with inline formatting intact, and [`split_fragments`] decides whether
//! the result is one insertion or several paragraph-level pieces.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Rewrite rules applied by [`clean_html`] before attributes are stripped
static NOISE_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
/// Rewrite rules applied by [`clean_html`] after attributes are stripped
static STRUCTURE_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
static START_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static NOISE_ATTRIBUTE_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static LINE_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();

fn compile(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("Invalid clipboard cleanup regex"),
                *replacement,
            )
        })
        .collect()
}

fn noise_rules() -> &'static [(Regex, &'static str)] {
    NOISE_RULES.get_or_init(|| {
        compile(&[
            // conditional comments and fragment markers first
            (r"(?is)<!--\[if[^\]]*\]>.*?<!\[endif\]-->", ""),
            (r"(?i)<!--(?:Start|End)Fragment-->", ""),
            (r"(?s)<!--.*?-->", ""),
            (r"(?i)<meta[^>]*>", ""),
            (r"(?is)<style[^>]*>.*?</style>", ""),
            (r"(?is)<script[^>]*>.*?</script>", ""),
            (r"(?i)<link[^>]*>", ""),
            (r"(?is)<o:p[^>]*>.*?</o:p>", ""),
            (r"(?i)</?o:p[^>]*>", ""),
            (r"(?is)<xml[^>]*>.*?</xml>", ""),
            (r"(?is)<w:[^>]*>.*?</w:[^>]*>", ""),
            (r"(?i)</?w:[^>]*>", ""),
        ])
    })
}

fn structure_rules() -> &'static [(Regex, &'static str)] {
    STRUCTURE_RULES.get_or_init(|| {
        compile(&[
            (r"(?i)</?span(?:\s[^>]*)?>", ""),
            (r"(?i)<div(?:\s[^>]*)?>", "<p>"),
            (r"(?i)</div\s*>", "</p>"),
            (r"(?i)<p(?:\s[^>]*)?>", "<p>"),
            (r"(?i)<h[1-6](?:\s[^>]*)?>", "<h3>"),
            (r"(?i)</h[1-6]\s*>", "</h3>"),
            (r"(?i)<p>\s*</p>", ""),
            (r"&nbsp;", " "),
            (r"\s+", " "),
            // whitespace collapse can expose more empty paragraphs
            (r"(?i)<p>\s*</p>", ""),
        ])
    })
}

fn start_tag_regex() -> &'static Regex {
    START_TAG_REGEX.get_or_init(|| {
        Regex::new(r"<([A-Za-z][A-Za-z0-9:-]*)(\s[^>]*)?>").expect("Invalid start tag regex")
    })
}

fn noise_attribute_regex() -> &'static Regex {
    NOISE_ATTRIBUTE_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?i)\s+(?:style|class|id|lang|dir|data-[\w-]*)\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"']+)"#,
        )
        .expect("Invalid attribute regex")
    })
}

fn apply_rules(text: String, rules: &[(Regex, &'static str)]) -> String {
    rules.iter().fold(text, |text, (pattern, replacement)| {
        pattern.replace_all(&text, *replacement).into_owned()
    })
}

/// Drop presentational attributes from start tags, leaving text untouched
fn strip_noise_attributes(markup: &str) -> String {
    start_tag_regex()
        .replace_all(markup, |captures: &Captures| {
            let attributes = captures.get(2).map_or("", |m| m.as_str());
            format!(
                "<{}{}>",
                &captures[1],
                noise_attribute_regex().replace_all(attributes, "")
            )
        })
        .into_owned()
}

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| {
        Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9:-]*)[^>]*?(/?)>").expect("Invalid tag regex")
    })
}

fn line_break_regex() -> &'static Regex {
    LINE_BREAK_REGEX.get_or_init(|| Regex::new(r"\r?\n").expect("Invalid line break regex"))
}

/// Strip presentational noise from clipboard markup
///
/// Comments, metadata, style and script elements and Office namespace tags
/// are removed. Presentational attributes are dropped from start tags
/// (text between tags is never touched), spans unwrapped, divs turned into
/// paragraphs, every heading level normalised to `h3`, empty paragraphs
/// removed and whitespace collapsed. The result is trimmed.
pub fn clean_html(raw: &str) -> String {
    let quiet = apply_rules(raw.to_string(), noise_rules());
    let bare = strip_noise_attributes(&quiet);
    apply_rules(bare, structure_rules()).trim().to_string()
}

/// How cleaned markup should be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupLayout {
    /// Two or more paragraph-level pieces: the first goes at the cursor, the
    /// rest become new paragraph blocks
    Fragments(Vec<String>),
    /// A single piece of markup for the cursor
    Inline(String),
}

/// A top-level element found while scanning markup
#[derive(Debug, Clone, PartialEq, Eq)]
struct TopLevelElement {
    tag: String,
    inner: String,
}

/// Document-level tags that fragment parsing ignores
const TRANSPARENT_ELEMENTS: &[&str] = &["html", "head", "body"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements that implicitly close an open `<p>`
const CLOSES_PARAGRAPH: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "div",
    "ul",
    "ol",
    "table",
    "blockquote",
    "pre",
    "hr",
];

/// Decide how cleaned markup is inserted
///
/// Paragraph and heading children with non-blank content become fragments
/// when the markup has more than one top-level element. A single wrapper
/// element around several paragraphs is looked through. A lone paragraph
/// is unwrapped. Anything else is inserted as-is.
pub fn split_fragments(cleaned: &str) -> MarkupLayout {
    let elements = top_level_elements(cleaned);

    if let [wrapper] = elements.as_slice()
        && !matches!(wrapper.tag.as_str(), "p" | "h3")
        && let MarkupLayout::Fragments(fragments) = split_fragments(&wrapper.inner)
    {
        return MarkupLayout::Fragments(fragments);
    }

    if elements.len() > 1 {
        let fragments: Vec<String> = elements
            .iter()
            .filter(|element| matches!(element.tag.as_str(), "p" | "h3"))
            .map(|element| element.inner.trim().to_string())
            .filter(|inner| !inner.is_empty())
            .collect();
        if fragments.len() > 1 {
            return MarkupLayout::Fragments(fragments);
        }
    }

    match elements.as_slice() {
        [only] if only.tag == "p" => MarkupLayout::Inline(only.inner.trim().to_string()),
        _ => MarkupLayout::Inline(cleaned.trim().to_string()),
    }
}

/// Non-blank lines of plain clipboard text, split on LF or CRLF
pub fn plain_lines(text: &str) -> Vec<String> {
    line_break_regex()
        .split(text)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Scan markup for its top-level elements
///
/// A forgiving scanner: unknown closing tags are ignored, unclosed elements
/// run to the end of the input, and a new block element closes an open
/// paragraph the way HTML parsers do.
fn top_level_elements(markup: &str) -> Vec<TopLevelElement> {
    let mut elements = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    // (tag, start of inner content) of the element being collected
    let mut current: Option<(String, usize)> = None;

    for captures in tag_regex().captures_iter(markup) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let closing = captures.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = captures.get(3).is_some_and(|m| !m.as_str().is_empty());
        let name = captures
            .get(2)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();
        if TRANSPARENT_ELEMENTS.contains(&name.as_str()) {
            continue;
        }

        if closing {
            let Some(position) = stack.iter().rposition(|open| *open == name) else {
                continue;
            };
            stack.truncate(position);
            if stack.is_empty()
                && let Some((tag, start)) = current.take()
            {
                elements.push(TopLevelElement {
                    tag,
                    inner: markup[start..whole.start()].to_string(),
                });
            }
            continue;
        }

        if CLOSES_PARAGRAPH.contains(&name.as_str())
            && let Some(position) = stack.iter().rposition(|open| open == "p")
        {
            stack.truncate(position);
            if stack.is_empty()
                && let Some((tag, start)) = current.take()
            {
                elements.push(TopLevelElement {
                    tag,
                    inner: markup[start..whole.start()].to_string(),
                });
            }
        }

        let is_void = self_closing || VOID_ELEMENTS.contains(&name.as_str());
        if stack.is_empty() {
            if is_void {
                elements.push(TopLevelElement {
                    tag: name,
                    inner: String::new(),
                });
                continue;
            }
            current = Some((name.clone(), whole.end()));
        }
        if !is_void {
            stack.push(name);
        }
    }

    if let Some((tag, start)) = current {
        elements.push(TopLevelElement {
            tag,
            inner: markup[start..].to_string(),
        });
    }

    elements
}
