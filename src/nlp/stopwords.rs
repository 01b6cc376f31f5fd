//! Stopword filtering
//!
//! The active stopword set is the union of a language list, loaded through a
//! [`StopwordProvider`], and the fixed [`ACADEMIC_STOPWORDS`] list. An
//! unsupported language yields no language list; the academic list still
//! applies.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Terms generic to academic papers: structural section names and
/// boilerplate that would otherwise dominate every ranking.
pub const ACADEMIC_STOPWORDS: &[&str] = &[
    "dan", "yang", "di", "ke", "dari", "ini", "itu", "pada", "untuk", "dengan", "adalah",
    "penelitian", "data", "hasil", "analisis", "kesimpulan", "sistem", "metode", "aplikasi",
    "gambar", "tabel", "bab", "jurnal", "paper", "skripsi", "tesis", "abstrak", "abstract",
];

/// Source of language stopword lists.
///
/// Returns `None` when no list exists for `language`.
pub trait StopwordProvider {
    fn stopwords(&self, language: &str) -> Option<Vec<String>>;
}

/// Provider backed by the `stop-words` crate (Stopwords ISO lists).
#[derive(Debug, Clone, Copy, Default)]
pub struct StopWordsCrateProvider;

impl StopWordsCrateProvider {
    fn language(code: &str) -> Option<LANGUAGE> {
        let lang = match code.to_lowercase().as_str() {
            "id" | "indonesian" => LANGUAGE::Indonesian,
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            _ => return None,
        };
        Some(lang)
    }
}

impl StopwordProvider for StopWordsCrateProvider {
    fn stopwords(&self, language: &str) -> Option<Vec<String>> {
        let lang = Self::language(language)?;
        Some(get(lang).iter().map(|s| s.to_string()).collect())
    }
}

/// A filter for removing stopwords from a lowercased token stream
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
    /// Whether the language list was found
    language_loaded: bool,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("id")
    }
}

impl StopwordFilter {
    /// Language list from the `stop-words` crate plus the academic list
    pub fn new(language: &str) -> Self {
        Self::with_provider(&StopWordsCrateProvider, language)
    }

    /// Language list from `provider` plus the academic list
    pub fn with_provider(provider: &dyn StopwordProvider, language: &str) -> Self {
        let loaded = provider.stopwords(language);
        let language_loaded = loaded.is_some();
        if !language_loaded {
            tracing::warn!(language, "no stopword list for language, using academic list only");
        }

        let mut filter = Self {
            stopwords: loaded
                .unwrap_or_default()
                .into_iter()
                .map(|w| w.to_lowercase())
                .collect(),
            language_loaded,
        };
        filter.add_stopwords(ACADEMIC_STOPWORDS);
        filter
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
            language_loaded: false,
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let mut filter = Self::empty();
        filter.add_stopwords(words);
        filter
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if an already-lowercased token is a stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Whether the language-specific list was available
    pub fn language_loaded(&self) -> bool {
        self.language_loaded
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
