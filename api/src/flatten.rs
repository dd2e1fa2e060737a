use scraper::{Html, Node};

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Flatten an HTML page into trimmed, non-empty text lines in document
/// order. Every text node contributes at least one line; non-breaking
/// spaces become plain spaces.
pub fn html_to_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let text = text.replace('\u{a0}', " ");
        lines.extend(
            text.split(['\n', '\r'])
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_owned),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_text_node() {
        let html = r#"
            <html><body>
              <table>
                <tr><td>2025-11-28</td></tr>
                <tr><td>19:00</td><td>MoDo Hockey - Östersunds IK</td><td>3 - 1</td></tr>
              </table>
            </body></html>"#;
        assert_eq!(
            html_to_lines(html),
            ["2025-11-28", "19:00", "MoDo Hockey - Östersunds IK", "3 - 1"]
        );
    }

    #[test]
    fn skips_scripts_and_styles() {
        let html = r#"
            <html><head><style>td { color: red }</style>
            <script>var x = "19:00";</script></head>
            <body><p>Hägglunds Arena</p><noscript>enable js</noscript></body></html>"#;
        assert_eq!(html_to_lines(html), ["Hägglunds Arena"]);
    }

    #[test]
    fn normalizes_nbsp_and_splits_newlines() {
        let html = "<div>Hägglunds&nbsp;Arena\n\n  7298 </div><div>&nbsp;</div>";
        assert_eq!(html_to_lines(html), ["Hägglunds Arena", "7298"]);
    }
}
