//! Name label shown next to a loop's play marker.
//!
//! The owning track computes the label's box every frame and emits it as a
//! `LabelBox`; whoever rasterizes that box draws the text and chrome inside it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopLabel {
    text: String,
}

impl LoopLabel {
    pub const DEFAULT_TEXT: &'static str = "loop";

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Surrounding whitespace is dropped; an empty name falls
    /// back to the default.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        self.text = if trimmed.is_empty() {
            Self::DEFAULT_TEXT.to_string()
        } else {
            trimmed.to_string()
        };
    }
}

impl Default for LoopLabel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEXT)
    }
}
