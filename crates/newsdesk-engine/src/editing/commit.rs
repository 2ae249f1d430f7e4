use std::time::{Duration, Instant};

use crate::models::BlockPatch;

/// Debounced commit of a text surface's content into the document
///
/// Keystrokes are buffered and committed after a quiet period; blur and the
/// end of an IME composition commit immediately. While the user is typing or
/// composing, content pushed from the document is not applied to the surface
/// so the caret never jumps.
///
/// Time is passed in explicitly, which keeps the machine deterministic.
#[derive(Debug, Clone)]
pub struct CommitBuffer {
    debounce: Duration,
    /// Last content committed or accepted from the document
    last_content: String,
    pending: Option<Pending>,
    composing: bool,
}

#[derive(Debug, Clone)]
struct Pending {
    content: String,
    deadline: Instant,
}

impl CommitBuffer {
    pub fn new(initial: impl Into<String>, debounce: Duration) -> Self {
        Self {
            debounce,
            last_content: initial.into(),
            pending: None,
            composing: false,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn last_content(&self) -> &str {
        &self.last_content
    }

    /// When the pending commit fires, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// A keystroke changed the surface; restarts the quiet period
    pub fn on_input(&mut self, content: impl Into<String>, now: Instant) {
        if self.composing {
            return;
        }
        self.pending = Some(Pending {
            content: content.into(),
            deadline: now + self.debounce,
        });
    }

    /// Commit once the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<BlockPatch> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        Some(self.commit(pending.content))
    }

    /// Focus left the surface: commit whatever it holds now
    pub fn on_blur(&mut self, content: impl Into<String>) -> BlockPatch {
        self.pending = None;
        self.commit(content.into())
    }

    pub fn on_composition_start(&mut self) {
        self.composing = true;
    }

    pub fn on_composition_end(&mut self, content: impl Into<String>) -> BlockPatch {
        self.composing = false;
        self.pending = None;
        self.commit(content.into())
    }

    /// Whether content coming from the document may replace the surface's
    pub fn should_accept_external(&self, incoming: &str, focused: bool) -> bool {
        incoming != self.last_content && !self.is_typing() && !self.composing && !focused
    }

    /// Record content the host pushed onto the surface
    pub fn accept_external(&mut self, incoming: impl Into<String>) {
        self.last_content = incoming.into();
    }

    fn commit(&mut self, content: String) -> BlockPatch {
        self.last_content.clone_from(&content);
        BlockPatch::html(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEBOUNCE: Duration = Duration::from_millis(300);

    #[test]
    fn test_commits_after_quiet_period() {
        let start = Instant::now();
        let mut buffer = CommitBuffer::new("", DEBOUNCE);

        buffer.on_input("H", start);
        buffer.on_input("He", start + Duration::from_millis(100));

        assert_eq!(buffer.poll(start + Duration::from_millis(350)), None);
        assert_eq!(
            buffer.poll(start + Duration::from_millis(400)),
            Some(BlockPatch::html("He"))
        );
        assert!(!buffer.is_typing());
        assert_eq!(buffer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_blur_commits_immediately() {
        let start = Instant::now();
        let mut buffer = CommitBuffer::new("old", DEBOUNCE);
        buffer.on_input("new", start);

        assert_eq!(buffer.on_blur("new"), BlockPatch::html("new"));
        assert_eq!(buffer.deadline(), None);
        assert_eq!(buffer.last_content(), "new");
    }

    #[test]
    fn test_input_ignored_while_composing() {
        let start = Instant::now();
        let mut buffer = CommitBuffer::new("", DEBOUNCE);

        buffer.on_composition_start();
        buffer.on_input("か", start);
        assert!(!buffer.is_typing());

        assert_eq!(buffer.on_composition_end("漢字"), BlockPatch::html("漢字"));
        assert!(!buffer.is_composing());
    }

    #[test]
    fn test_external_content_rules() {
        let start = Instant::now();
        let mut buffer = CommitBuffer::new("same", DEBOUNCE);

        assert!(!buffer.should_accept_external("same", false));
        assert!(buffer.should_accept_external("other", false));
        assert!(!buffer.should_accept_external("other", true));

        buffer.on_input("typing", start);
        assert!(!buffer.should_accept_external("other", false));

        buffer.on_blur("typing");
        buffer.on_composition_start();
        assert!(!buffer.should_accept_external("other", false));
        buffer.on_composition_end("typing");

        buffer.accept_external("other");
        assert!(!buffer.should_accept_external("other", false));
    }
}
