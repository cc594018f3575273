//! Record extraction
//!
//! Turns fetched HTML into string-keyed field maps. The engine is chosen
//! once at run start from a closed set of kinds; configs naming an unknown
//! engine fail validation instead of probing capabilities at runtime.

mod css;

pub use css::CssExtractor;

use std::collections::BTreeMap;

/// One extracted record: field name to value
pub type Record = BTreeMap<String, String>;

/// Known extraction engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// CSS selectors with `::text` / `::attr(name)` suffixes
    Css,
}

impl ExtractorKind {
    /// Resolves an engine name from config
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "css" => Some(Self::Css),
            _ => None,
        }
    }
}

/// Extraction engine dispatch
pub enum Extractor {
    Css(CssExtractor),
}

impl Extractor {
    /// Instantiates the engine for the given kind
    pub fn new(kind: ExtractorKind) -> Self {
        match kind {
            ExtractorKind::Css => Self::Css(CssExtractor),
        }
    }

    /// Extracts one record per element matched by `item_selector`
    pub fn extract_items(
        &self,
        html: &str,
        item_selector: &str,
        fields: &BTreeMap<String, String>,
    ) -> Vec<Record> {
        match self {
            Self::Css(extractor) => extractor.extract_items(html, item_selector, fields),
        }
    }

    /// Extracts a single value from the whole document
    ///
    /// Used for next-link resolution. Empty matches count as absent.
    pub fn extract_one(&self, html: &str, selector: &str) -> Option<String> {
        match self {
            Self::Css(extractor) => extractor.extract_one(html, selector),
        }
    }
}
