//! Word segmentation
//!
//! [`UnicodeSegmenter`] splits on UAX #29 word boundaries and is the default.
//! [`WhitespaceSegmenter`] is the fallback when a segmenter reports itself
//! unavailable.

use unicode_segmentation::UnicodeSegmentation;

/// Splits cleaned text into word tokens.
pub trait WordSegmenter: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the segmenter's linguistic resources can be used.
    fn is_available(&self) -> bool {
        true
    }

    /// Split `text` into words, in order.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// UAX #29 word segmentation via `unicode-segmentation`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl WordSegmenter for UnicodeSegmenter {
    fn name(&self) -> &'static str {
        "unicode"
    }

    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_words().collect()
    }
}

/// Plain whitespace splitting
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl WordSegmenter for WhitespaceSegmenter {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split_whitespace().collect()
    }
}
