//! Text normalization
//!
//! Turns raw document text into the ordered token sequence the graph is
//! built from. Steps, in order: strip digits, strip everything that is not a
//! word character or whitespace, lowercase, segment into words, then keep
//! purely alphabetic words longer than two characters that are not
//! stopwords. Order and duplicates are preserved.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::stopwords::{StopWordsCrateProvider, StopwordFilter, StopwordProvider};
use super::tokenizer::{UnicodeSegmenter, WhitespaceSegmenter, WordSegmenter};

/// Minimum token length, exclusive, in characters
const MIN_TOKEN_CHARS: usize = 2;

/// Outcome of probing linguistic resources once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// The language stopword list was loaded
    pub stopwords: bool,
    /// The configured segmenter can be used
    pub segmenter: bool,
}

impl Capabilities {
    /// Whether every resource is available
    pub fn is_complete(&self) -> bool {
        self.stopwords && self.segmenter
    }
}

/// Normalizer with resources resolved up front
#[derive(Clone)]
pub struct Normalizer {
    stopwords: StopwordFilter,
    segmenter: Arc<dyn WordSegmenter>,
    capabilities: Capabilities,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("stopwords", &self.stopwords.len())
            .field("segmenter", &self.segmenter.name())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

impl Normalizer {
    /// Normalizer using the `stop-words` crate and Unicode word segmentation
    pub fn new(language: &str) -> Self {
        Self::with_resources(&StopWordsCrateProvider, Arc::new(UnicodeSegmenter), language)
    }

    /// Normalizer with explicit resource providers.
    ///
    /// Each resource is probed exactly once here. An unavailable stopword
    /// list leaves only the academic list; an unavailable segmenter is
    /// replaced by whitespace splitting.
    pub fn with_resources(
        provider: &dyn StopwordProvider,
        segmenter: Arc<dyn WordSegmenter>,
        language: &str,
    ) -> Self {
        let stopwords = StopwordFilter::with_provider(provider, language);
        let segmenter_ok = segmenter.is_available();
        let segmenter: Arc<dyn WordSegmenter> = if segmenter_ok {
            segmenter
        } else {
            tracing::warn!(
                segmenter = segmenter.name(),
                "segmenter unavailable, falling back to whitespace splitting"
            );
            Arc::new(WhitespaceSegmenter)
        };

        let capabilities = Capabilities {
            stopwords: stopwords.language_loaded(),
            segmenter: segmenter_ok,
        };
        tracing::debug!(
            language,
            stopwords = stopwords.len(),
            segmenter = segmenter.name(),
            "normalizer ready"
        );

        Self {
            stopwords,
            segmenter,
            capabilities,
        }
    }

    /// Normalizer with a prepared stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        let capabilities = Capabilities {
            stopwords: stopwords.language_loaded(),
            segmenter: true,
        };
        Self {
            stopwords,
            segmenter: Arc::new(UnicodeSegmenter),
            capabilities,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Normalize `text` into the filtered token sequence
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = clean_text(text);
        self.segmenter
            .segment(&cleaned)
            .into_iter()
            .filter(|word| is_candidate(word, &self.stopwords))
            .map(str::to_string)
            .collect()
    }
}

/// Normalize with Unicode segmentation and the given stopwords
pub fn normalize(text: &str, stopwords: &StopwordFilter) -> Vec<String> {
    let cleaned = clean_text(text);
    UnicodeSegmenter
        .segment(&cleaned)
        .into_iter()
        .filter(|word| is_candidate(word, stopwords))
        .map(str::to_string)
        .collect()
}

static DECIMAL_DIGITS: OnceLock<Regex> = OnceLock::new();
static NON_WORD: OnceLock<Regex> = OnceLock::new();
static LETTERS_ONLY: OnceLock<Regex> = OnceLock::new();

fn decimal_digits() -> &'static Regex {
    DECIMAL_DIGITS.get_or_init(|| Regex::new(r"\d+").expect("static pattern"))
}

// Word characters are letters, numbers of any kind and underscore.
fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_\s]").expect("static pattern"))
}

fn letters_only() -> &'static Regex {
    LETTERS_ONLY.get_or_init(|| Regex::new(r"^\p{L}+$").expect("static pattern"))
}

/// Strip decimal digits and punctuation, then lowercase
///
/// Other numeric characters (superscripts, roman numerals) are kept here so
/// the word containing them fails [`is_candidate`] instead of being glued
/// back together.
pub fn clean_text(text: &str) -> String {
    let without_digits = decimal_digits().replace_all(text, "");
    non_word().replace_all(&without_digits, "").to_lowercase()
}

/// Whether a segmented word survives token filtering
pub fn is_candidate(word: &str, stopwords: &StopwordFilter) -> bool {
    letters_only().is_match(word)
        && word.chars().count() > MIN_TOKEN_CHARS
        && !stopwords.is_stopword(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSegmenter;

    impl WordSegmenter for BrokenSegmenter {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn is_available(&self) -> bool {
            false
        }

        fn segment<'a>(&self, _text: &'a str) -> Vec<&'a str> {
            Vec::new()
        }
    }

    struct NoStopwords;

    impl StopwordProvider for NoStopwords {
        fn stopwords(&self, _language: &str) -> Option<Vec<String>> {
            None
        }
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("Graph-Based 2024 Ranking!"), "graphbased  ranking");
        assert_eq!(clean_text("snake_case stays"), "snake_case stays");
    }

    #[test]
    fn test_normalize_filters_and_keeps_order() {
        let stopwords = StopwordFilter::from_list(&["the", "and"]);
        let tokens = normalize(
            "The neural network and the NEURAL model, 3 times: an ok network.",
            &stopwords,
        );
        assert_eq!(
            tokens,
            vec!["neural", "network", "neural", "model", "times", "network"]
        );
    }

    #[test]
    fn test_digits_stripped_before_filtering() {
        let stopwords = StopwordFilter::empty();
        // "abc123" becomes "abc"; "12" disappears entirely
        assert_eq!(normalize("abc123 12 x9y", &stopwords), vec!["abc"]);
    }

    #[test]
    fn test_non_decimal_numerics_drop_the_word() {
        let stopwords = StopwordFilter::empty();
        assert!(normalize("x\u{00B2}yz ab\u{216B}c", &stopwords).is_empty());
        assert_eq!(clean_text("x\u{00B2}yz"), "x\u{00B2}yz");
        // decimal digits from other scripts are still stripped
        assert_eq!(normalize("gra\u{0663}ph", &stopwords), vec!["graph"]);
    }

    #[test]
    fn test_underscore_words_dropped() {
        let stopwords = StopwordFilter::empty();
        assert_eq!(normalize("snake_case word", &stopwords), vec!["word"]);
    }

    #[test]
    fn test_length_counts_characters() {
        let stopwords = StopwordFilter::empty();
        // two characters, four bytes
        assert!(normalize("éé", &stopwords).is_empty());
        assert_eq!(normalize("ééé", &stopwords), vec!["ééé"]);
    }

    #[test]
    fn test_empty_text() {
        let normalizer = Normalizer::new("en");
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("  12 34 !! ").is_empty());
    }

    #[test]
    fn test_normalizer_applies_language_and_academic_lists() {
        let normalizer = Normalizer::new("en");
        let tokens = normalizer.normalize("The abstract and the graph centrality of the network");
        assert_eq!(tokens, vec!["graph", "centrality", "network"]);
    }

    #[test]
    fn test_unavailable_segmenter_falls_back_to_whitespace() {
        let normalizer =
            Normalizer::with_resources(&StopWordsCrateProvider, Arc::new(BrokenSegmenter), "en");

        assert!(!normalizer.capabilities().segmenter);
        assert!(!normalizer.capabilities().is_complete());
        let tokens = normalizer.normalize("graph centrality network");
        assert_eq!(tokens, vec!["graph", "centrality", "network"]);
    }

    #[test]
    fn test_unavailable_stopwords_keep_academic_list() {
        let normalizer =
            Normalizer::with_resources(&NoStopwords, Arc::new(UnicodeSegmenter), "en");

        assert!(!normalizer.capabilities().stopwords);
        let tokens = normalizer.normalize("the tabel shows the graph");
        assert_eq!(tokens, vec!["the", "shows", "the", "graph"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = Normalizer::new("en");
        let text = "Co-occurrence graphs rank words; graphs rank words again.";
        assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
    }
}
