//! Small query helpers over a parsed [`Html`] document.

use scraper::{ElementRef, Html, Node, Selector};

/// Parse a list of selectors known to be valid at compile time
pub(crate) fn selectors(css: &[&str]) -> Vec<Selector> {
    css.iter()
        .map(|s| Selector::parse(s).expect("static selector must parse"))
        .collect()
}

/// Visible text of an element with whitespace runs collapsed and trimmed
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// All text of the document outside of script, style and noscript blocks
pub fn visible_text(document: &Html) -> String {
    let mut parts = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| matches!(el.name(), "script" | "style" | "noscript"))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}
