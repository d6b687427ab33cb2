// src/core/html.rs
// Small helpers over `scraper` for selector fallback chains.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

/// Visible text of an element, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Elements for the first selector in `chain` that matches anything.
pub fn select_first_nonempty<'a>(doc: &'a Html, chain: &[Selector]) -> Vec<ElementRef<'a>> {
    for sel in chain {
        let found: Vec<_> = doc.select(sel).collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// First non-empty text found by walking `chain` inside `scope`.
pub fn first_text(scope: ElementRef<'_>, chain: &[Selector]) -> String {
    chain
        .iter()
        .filter_map(|sel| scope.select(sel).next())
        .map(text_of)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Trimmed attribute value, empty when missing.
pub fn attr_of(el: ElementRef<'_>, name: &str) -> String {
    el.value().attr(name).map(str::trim).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_skips_empty_matches() {
        let doc = Html::parse_fragment(
            r#"<div><span class="a">   </span><span class="b"> Acme
                 Corp </span></div>"#,
        );
        let root = doc.root_element();
        let chain = sels![".a", ".b"];
        assert_eq!(first_text(root, chain), "Acme Corp");
    }

    #[test]
    fn select_first_nonempty_uses_priority() {
        let doc = Html::parse_document(r#"<ul><li class="y">1</li><li class="x">2</li></ul>"#);
        let chain = sels![".missing", ".x", ".y"];
        let found = select_first_nonempty(&doc, chain);
        assert_eq!(found.len(), 1);
        assert_eq!(text_of(found[0]), "2");
    }

    #[test]
    fn attr_of_missing_is_empty() {
        let doc = Html::parse_fragment(r#"<a href=" /x ">t</a>"#);
        let a = doc.select(sel!("a")).next().unwrap();
        assert_eq!(attr_of(a, "href"), "/x");
        assert_eq!(attr_of(a, "title"), "");
    }
}
