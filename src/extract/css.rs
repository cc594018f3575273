//! CSS selector extraction
//!
//! Field selectors accept two pseudo-selector suffixes on top of standard
//! CSS: `::text` for the element's collected text and `::attr(name)` for an
//! attribute value. A bare selector yields the element's text.

use crate::extract::Record;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// CSS-based extraction engine
pub struct CssExtractor;

impl CssExtractor {
    /// Extracts one record per element matched by `item_selector`
    ///
    /// Fields that do not match within an item come back as empty strings,
    /// so every record carries the same columns.
    pub fn extract_items(
        &self,
        html: &str,
        item_selector: &str,
        fields: &BTreeMap<String, String>,
    ) -> Vec<Record> {
        if item_selector.trim().is_empty() {
            return Vec::new();
        }
        let Ok(items) = Selector::parse(item_selector) else {
            tracing::warn!("Invalid items selector: {}", item_selector);
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let mut records = Vec::new();
        for item in document.select(&items) {
            let mut record = Record::new();
            for (name, selector) in fields {
                let value = select_value(item, selector).unwrap_or_default();
                record.insert(name.clone(), value);
            }
            records.push(record);
        }
        records
    }

    /// Extracts a single value from the whole document
    pub fn extract_one(&self, html: &str, selector: &str) -> Option<String> {
        let document = Html::parse_document(html);
        select_value(document.root_element(), selector).filter(|value| !value.is_empty())
    }
}

/// Evaluates a field selector within an element
fn select_value(scope: ElementRef, selector: &str) -> Option<String> {
    if let Some(css) = selector.strip_suffix("::text") {
        let found = select_first(scope, css)?;
        return Some(collect_text(&found));
    }

    if let Some(start) = selector.rfind("::attr(") {
        if selector.ends_with(')') {
            let css = &selector[..start];
            let attr_name = &selector[start + "::attr(".len()..selector.len() - 1];
            let found = select_first(scope, css)?;
            return found.value().attr(attr_name).map(|value| value.to_string());
        }
    }

    let found = select_first(scope, selector)?;
    Some(collect_text(&found))
}

fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

fn collect_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
