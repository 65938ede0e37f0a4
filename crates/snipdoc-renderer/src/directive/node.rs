//! Document nodes produced by directives.

/// Format tag carried by raw HTML nodes.
pub const HTML_FORMAT: &str = "html";

/// A node returned by a directive handler.
///
/// The host takes ownership of returned nodes and splices them into the
/// document at the invocation site.
///
/// # Example
///
/// ```
/// use snipdoc_renderer::directive::Node;
///
/// let node = Node::raw_html("<div>Hello</div>");
/// assert_eq!(node.to_html(), Some("<div>Hello</div>"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Node {
    /// Content emitted verbatim by writers handling its format.
    Raw(RawNode),
}

impl Node {
    /// Create a raw node tagged with the `html` format.
    #[must_use]
    pub fn raw_html(content: impl Into<String>) -> Self {
        Self::Raw(RawNode::new(HTML_FORMAT, content))
    }

    /// HTML emitted for this node, or `None` if the HTML writer drops it.
    #[must_use]
    pub fn to_html(&self) -> Option<&str> {
        match self {
            Self::Raw(raw) if raw.has_format(HTML_FORMAT) => Some(&raw.content),
            Self::Raw(_) => None,
        }
    }
}

/// Raw passthrough node.
///
/// `format` is a whitespace-separated list of output formats the content is
/// meant for (usually just `html`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawNode {
    /// Target output format(s).
    pub format: String,
    /// Verbatim content.
    pub content: String,
}

impl RawNode {
    #[must_use]
    pub fn new(format: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            content: content.into(),
        }
    }

    /// Check whether this node targets the given output format.
    #[must_use]
    pub fn has_format(&self, format: &str) -> bool {
        self.format
            .split_whitespace()
            .any(|f| f.eq_ignore_ascii_case(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_html() {
        let node = Node::raw_html("<p>test</p>");
        assert_eq!(
            node,
            Node::Raw(RawNode {
                format: "html".to_owned(),
                content: "<p>test</p>".to_owned(),
            })
        );
    }

    #[test]
    fn test_to_html_drops_other_formats() {
        let node = Node::Raw(RawNode::new("latex", r"\newpage"));
        assert_eq!(node.to_html(), None);
    }

    #[test]
    fn test_has_format_multiple() {
        let raw = RawNode::new("latex html", "x");
        assert!(raw.has_format("html"));
        assert!(raw.has_format("latex"));
        assert!(!raw.has_format("man"));
    }

    #[test]
    fn test_to_html_keeps_content_verbatim() {
        let content = "<script>alert(1)</script>\n\n  <b>&amp;</b>\n";
        let node = Node::raw_html(content);
        assert_eq!(node.to_html(), Some(content));
    }
}
