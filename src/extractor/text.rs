use scraper::node::Node;
use scraper::{ElementRef, Html};

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// All text a reader could see, one space between text nodes.
pub fn visible_text(doc: &Html) -> String {
    let mut out = String::new();
    collect(doc.root_element(), &mut out);
    out
}

fn collect(el: ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                let t = t.trim();
                if !t.is_empty() {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(t);
                }
            }
            Node::Element(e) if HIDDEN_TAGS.contains(&e.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Element text trimmed at both ends; inner whitespace is kept as written.
pub fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_scripts_and_styles() {
        let doc = Html::parse_document(
            "<html><head><title>T</title><style>p{color:red}</style></head>\
             <body><p>Call us</p><script>var x = 'chat';</script><p>today</p></body></html>",
        );
        assert_eq!(visible_text(&doc), "Call us today");
    }

    #[test]
    fn adjacent_nodes_do_not_run_together() {
        let doc = Html::parse_document("<p><b>555</b><i>123</i>4567</p>");
        assert_eq!(visible_text(&doc), "555 123 4567");
    }

    #[test]
    fn element_text_keeps_inner_whitespace() {
        let doc = Html::parse_fragment("<div>\n  Line one.\n\n  <b>Line</b> two.\n</div>");
        let sel = scraper::Selector::parse("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(el), "Line one.\n\n  Line two.");
    }
}
