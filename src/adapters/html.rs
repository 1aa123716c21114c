use crate::domain::ports::TextExtractor;
use scraper::{Html, Node};

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "template", "noscript"];

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTextExtractor;

impl TextExtractor for HtmlTextExtractor {
    fn extract_text(&self, body: &[u8]) -> String {
        visible_text(&String::from_utf8_lossy(body))
    }
}

/// Every visible text node of `html`, trimmed and concatenated in document order.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        out.push_str(text.trim());
    }

    out
}
