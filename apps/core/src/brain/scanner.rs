//! Keyword scanner.
//!
//! Pure substring containment over lower-cased text. No tokenization or stemming.

use super::keywords::{catalog, Category, KeywordCatalog, ModifierKind};

/// Keywords of a single category found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category: Category,
    pub base_severity: u8,
    pub keywords: Vec<&'static str>,
}

/// Everything the scanner found in one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Categories with at least one hit, in priority order.
    pub matches: Vec<CategoryMatch>,
    /// Modifier kinds with at least one hit, each listed once.
    pub modifiers: Vec<ModifierKind>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// All matched category keywords, in catalogue order. Modifier phrases are not included.
    pub fn matched_keywords(&self) -> Vec<&'static str> {
        self.matches
            .iter()
            .flat_map(|m| m.keywords.iter().copied())
            .collect()
    }

    pub fn has(&self, category: Category) -> bool {
        self.matches.iter().any(|m| m.category == category)
    }
}

/// Lower-cases the text and folds typographic apostrophes so "can’t" matches "can't".
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Scans text against the shared catalogue.
pub fn scan(text: &str) -> ScanResult {
    scan_with(catalog(), text)
}

/// Scans text against an explicit catalogue.
pub fn scan_with(catalog: &KeywordCatalog, text: &str) -> ScanResult {
    let normalized = normalize(text);
    if normalized.trim().is_empty() {
        return ScanResult::default();
    }

    let matches = catalog
        .categories()
        .iter()
        .filter_map(|entry| {
            let found: Vec<&'static str> = entry
                .keywords
                .iter()
                .copied()
                .filter(|kw| normalized.contains(kw))
                .collect();
            (!found.is_empty()).then(|| CategoryMatch {
                category: entry.category,
                base_severity: entry.base_severity,
                keywords: found,
            })
        })
        .collect();

    let modifiers = catalog
        .modifiers()
        .iter()
        .filter(|m| m.phrases.iter().any(|p| normalized.contains(p)))
        .map(|m| m.kind)
        .collect();

    ScanResult { matches, modifiers }
}
