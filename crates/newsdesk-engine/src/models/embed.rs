use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Third-party service an embed block points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedService {
    /// No URL has been recognised yet
    #[default]
    #[serde(rename = "")]
    Unresolved,
    Youtube,
    Twitter,
    Instagram,
    Threads,
}

impl EmbedService {
    pub fn as_str(self) -> &'static str {
        match self {
            EmbedService::Unresolved => "",
            EmbedService::Youtube => "youtube",
            EmbedService::Twitter => "twitter",
            EmbedService::Instagram => "instagram",
            EmbedService::Threads => "threads",
        }
    }
}

impl fmt::Display for EmbedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A URL recognised as embeddable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedDescriptor {
    pub service: EmbedService,
    pub id: String,
    pub normalized_url: String,
}

/// Turns a pasted URL into an embed descriptor
///
/// Hosts that support more services implement this themselves; the store only
/// ever talks to the trait.
pub trait EmbedResolver {
    fn resolve(&self, url: &str) -> Option<EmbedDescriptor>;
}

/// Resolver for the services the article renderer knows how to embed
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownServices;

static SERVICE_PATTERNS: OnceLock<Vec<(EmbedService, Regex)>> = OnceLock::new();

fn service_patterns() -> &'static [(EmbedService, Regex)] {
    SERVICE_PATTERNS.get_or_init(|| {
        [
            (
                EmbedService::Youtube,
                r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/|v/|shorts/)|youtu\.be/)([a-zA-Z0-9_-]{11})(?:\S+)?",
            ),
            (
                EmbedService::Twitter,
                r"(?:https?://)?(?:www\.)?(?:twitter\.com|x\.com)/\w+/status/(\d+)",
            ),
            (
                EmbedService::Instagram,
                r"(?:https?://)?(?:www\.)?instagram\.com/p/([A-Za-z0-9_-]+)",
            ),
            (
                EmbedService::Threads,
                r"(?:https?://)?(?:www\.)?threads\.net/@[\w.]+/post/([A-Za-z0-9_-]+)|(?:https?://)?(?:www\.)?threads\.com/@[\w.]+/post/([A-Za-z0-9_-]+)",
            ),
        ]
        .into_iter()
        .map(|(service, pattern)| {
            (
                service,
                Regex::new(pattern).expect("Invalid embed service regex"),
            )
        })
        .collect()
    })
}

impl EmbedResolver for KnownServices {
    fn resolve(&self, url: &str) -> Option<EmbedDescriptor> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        service_patterns().iter().find_map(|(service, pattern)| {
            let captures = pattern.captures(url)?;
            // Threads has one capture group per domain
            let id = captures.get(1).or_else(|| captures.get(2))?;
            Some(EmbedDescriptor {
                service: *service,
                id: id.as_str().to_string(),
                normalized_url: url.to_string(),
            })
        })
    }
}
