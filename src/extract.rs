// src/extract.rs
// =============================================================================
// Turns raw HTML into the plain text we put in the document.
//
// How it works:
// 1. Parse the markup with scraper (html5ever repairs broken markup the way
//    browsers do, so this never fails)
// 2. Walk the node tree, skipping whole subtrees whose element kind is
//    non-content (scripts, styles, navigation, headers, footers, iframes, forms)
// 3. Join every remaining text node with a space, then collapse all runs of
//    whitespace into a single space and trim the ends
//
// The result is stable: extracting text from already-extracted text returns
// it unchanged.
// =============================================================================

use scraper::{Html, Node};

/// The element kinds the extractor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Script,
    Style,
    Nav,
    Header,
    Footer,
    IFrame,
    Form,
    Content,
}

impl ElementKind {
    pub fn from_tag(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "script" => ElementKind::Script,
            "style" => ElementKind::Style,
            "nav" => ElementKind::Nav,
            "header" => ElementKind::Header,
            "footer" => ElementKind::Footer,
            "iframe" => ElementKind::IFrame,
            "form" => ElementKind::Form,
            _ => ElementKind::Content,
        }
    }

    /// Non-content elements are dropped along with everything inside them.
    pub fn is_removable(self) -> bool {
        !matches!(self, ElementKind::Content)
    }
}

/// Extracts normalized visible text from raw markup.
pub fn extract_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    extract_document_text(&document)
}

fn extract_document_text(document: &Html) -> String {
    let mut raw = String::new();

    // explicit stack instead of recursion: deeply nested markup can't blow the stack
    let mut stack = vec![document.tree.root()];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                raw.push_str(text);
                raw.push(' ');
                continue;
            }
            Node::Element(element) if ElementKind::from_tag(element.name()).is_removable() => {
                continue;
            }
            Node::Element(_) | Node::Document | Node::Fragment => {}
            // comments, doctypes, processing instructions
            _ => continue,
        }
        // reversed so the leftmost child is popped first
        stack.extend(node.children().rev());
    }

    collapse_whitespace(&raw)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_removed_and_whitespace_collapsed() {
        let html = "<html><head><script>x</script></head><body><p>Hello</p>  <p>World.</p></body></html>";
        assert_eq!(extract_text(html), "Hello World.");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = "<body><h1>Title</h1>\n\t<p>Some   text\nhere.</p></body>";
        let once = extract_text(html);
        assert_eq!(once, "Title Some text here.");
        assert_eq!(extract_text(&once), once);
    }

    #[test]
    fn test_non_content_elements_removed() {
        let html = r#"
            <html>
              <head><style>body { color: red }</style></head>
              <body>
                <header>Site header</header>
                <nav><a href="/">Home</a></nav>
                <main><p>Article body</p></main>
                <iframe src="/ad"></iframe>
                <form><label>Search</label><input></form>
                <footer>Copyright</footer>
              </body>
            </html>
        "#;
        assert_eq!(extract_text(html), "Article body");
    }

    #[test]
    fn test_nested_removal_drops_whole_subtree() {
        let html = "<body><nav><div><p>deep menu</p></div></nav><p>kept</p></body>";
        assert_eq!(extract_text(html), "kept");
    }

    #[test]
    fn test_text_order_is_document_order() {
        let html = "<body><div>one <b>two</b></div><span>three</span></body>";
        assert_eq!(extract_text(html), "one two three");
    }

    #[test]
    fn test_comments_ignored() {
        let html = "<body><!-- hidden -->visible</body>";
        assert_eq!(extract_text(html), "visible");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<html><body><script>only()</script></body></html>"), "");
        assert_eq!(extract_text("<body>   \n\t </body>"), "");
    }

    #[test]
    fn test_malformed_markup_is_repaired() {
        let html = "<div><p>unclosed <b>bold</div><p>next";
        assert_eq!(extract_text(html), "unclosed bold next");
    }

    #[test]
    fn test_element_kind() {
        assert_eq!(ElementKind::from_tag("SCRIPT"), ElementKind::Script);
        assert_eq!(ElementKind::from_tag("iframe"), ElementKind::IFrame);
        assert!(ElementKind::from_tag("footer").is_removable());
        assert!(!ElementKind::from_tag("p").is_removable());
    }
}
