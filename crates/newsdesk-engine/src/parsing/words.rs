use std::sync::OnceLock;

use regex::Regex;

/// Reading speed assumed when the host does not configure one
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub word_count: usize,
    /// Whole minutes, rounded up
    pub reading_time: usize,
}

/// Statistics at the default reading speed
pub fn estimate(text: &str) -> TextStats {
    estimate_with_rate(text, DEFAULT_WORDS_PER_MINUTE)
}

pub fn estimate_with_rate(text: &str, words_per_minute: usize) -> TextStats {
    let word_count = word_count(text);
    TextStats {
        word_count,
        reading_time: reading_time(word_count, words_per_minute),
    }
}

/// Count whitespace-delimited words after dropping markup tags
///
/// Tags are replaced by a space so adjacent elements never fuse into one
/// word, and entities are decoded so `&nbsp;` separates words.
pub fn word_count(text: &str) -> usize {
    let stripped = tag_regex().replace_all(text, " ");
    html_escape::decode_html_entities(&stripped)
        .split_whitespace()
        .count()
}

/// Minutes to read `words` words, rounded up; zero words is zero minutes
pub fn reading_time(words: usize, words_per_minute: usize) -> usize {
    if words_per_minute == 0 {
        return 0;
    }
    words.div_ceil(words_per_minute)
}
