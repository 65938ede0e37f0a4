//! Single-pass placeholder substitution for post-processing.
//!
//! Collects node HTML during post-processing and splices it into the rendered
//! document in one scan.

const PLACEHOLDER_PREFIX: &str = "<!--snipdoc-node:";
const PLACEHOLDER_SUFFIX: &str = "-->";

/// Collects the HTML for each node placeholder for single-pass application.
///
/// Content is registered in node order, so the `n`th call to
/// [`push()`](Self::push) supplies the HTML for [`placeholder(n)`](Self::placeholder).
/// [`apply()`](Self::apply) then scans the rendered HTML once for the shared
/// placeholder prefix and parses the index that follows it.
///
/// Inserted text is never rescanned, so node content is emitted verbatim even
/// when it happens to contain a placeholder.
///
/// # Example
///
/// ```
/// use snipdoc_renderer::directive::Replacements;
///
/// let mut html = format!(
///     "<p>{} and {}</p>",
///     Replacements::placeholder(0),
///     Replacements::placeholder(1)
/// );
/// let mut replacements = Replacements::new();
/// replacements.push("<b>A</b>");
/// replacements.push("B");
/// replacements.apply(&mut html);
///
/// assert_eq!(html, "<p><b>A</b> and B</p>");
/// ```
#[derive(Debug, Default)]
pub struct Replacements<'a> {
    items: Vec<&'a str>,
}

impl<'a> Replacements<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Placeholder emitted for the node with the given index.
    ///
    /// An HTML comment passes through pulldown-cmark unchanged both as a block
    /// (own line) and inline (inside a paragraph).
    #[must_use]
    pub fn placeholder(index: usize) -> String {
        format!("{PLACEHOLDER_PREFIX}{index}{PLACEHOLDER_SUFFIX}")
    }

    /// Register the content for the next placeholder index.
    pub fn push(&mut self, content: &'a str) {
        self.items.push(content);
    }

    /// Substitute every known placeholder in one left-to-right scan.
    ///
    /// Placeholders with an index that was never registered are left as is.
    ///
    /// Note: This consumes the replacements to prevent accidental reuse.
    pub fn apply(self, html: &mut String) {
        if self.items.is_empty() {
            return;
        }

        let mut output = String::with_capacity(html.len());
        let mut rest = html.as_str();

        while let Some(pos) = rest.find(PLACEHOLDER_PREFIX) {
            let after = &rest[pos + PLACEHOLDER_PREFIX.len()..];
            output.push_str(&rest[..pos]);

            match self.lookup(after) {
                Some((content, len)) => {
                    output.push_str(content);
                    rest = &after[len..];
                }
                None => {
                    output.push_str(PLACEHOLDER_PREFIX);
                    rest = after;
                }
            }
        }
        output.push_str(rest);

        *html = output;
    }

    /// Parse `<index>-->` at the start of `s`. Returns the registered content
    /// and the number of bytes matched.
    fn lookup(&self, s: &str) -> Option<(&'a str, usize)> {
        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || !s[digits..].starts_with(PLACEHOLDER_SUFFIX) {
            return None;
        }
        let index: usize = s[..digits].parse().ok()?;
        let content = *self.items.get(index)?;
        Some((content, digits + PLACEHOLDER_SUFFIX.len()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn placeholders(indices: &[usize]) -> String {
        indices.iter().map(|&i| Replacements::placeholder(i)).collect()
    }

    #[test]
    fn test_placeholder_format() {
        assert_eq!(Replacements::placeholder(12), "<!--snipdoc-node:12-->");
    }

    #[test]
    fn test_empty_replacements() {
        let mut html = placeholders(&[0]);
        Replacements::new().apply(&mut html);
        assert_eq!(html, "<!--snipdoc-node:0-->");
    }

    #[test]
    fn test_substitutes_by_index() {
        let mut html = format!("{}<p>x</p>{}", placeholders(&[1]), placeholders(&[0]));
        let mut replacements = Replacements::with_capacity(2);
        replacements.push("</header>");
        replacements.push("<header>");
        replacements.apply(&mut html);
        assert_eq!(html, "<header><p>x</p></header>");
    }

    #[test]
    fn test_repeated_placeholder() {
        let mut html = placeholders(&[0, 0]);
        let mut replacements = Replacements::new();
        replacements.push("a");
        replacements.apply(&mut html);
        assert_eq!(html, "aa");
    }

    #[test]
    fn test_inserted_text_is_not_rescanned() {
        let mut html = placeholders(&[0, 1]);
        let mut replacements = Replacements::new();
        replacements.push("<!--snipdoc-node:1-->");
        replacements.push("B");
        replacements.apply(&mut html);
        assert_eq!(html, "<!--snipdoc-node:1-->B");
    }

    #[test]
    fn test_unknown_or_malformed_placeholder_kept() {
        let input = "<!--snipdoc-node:7--> <!--snipdoc-node:--> <!--snipdoc-node:0x-->";
        let mut html = input.to_owned();
        let mut replacements = Replacements::new();
        replacements.push("A");
        replacements.apply(&mut html);
        assert_eq!(html, input);
    }

    #[test]
    fn test_many_nodes() {
        let mut html = placeholders(&(0..500).collect::<Vec<_>>());
        let contents: Vec<String> = (0..500).map(|i| format!("[{i}]")).collect();
        let mut replacements = Replacements::with_capacity(contents.len());
        for content in &contents {
            replacements.push(content);
        }
        assert_eq!(replacements.len(), 500);
        replacements.apply(&mut html);
        assert_eq!(html, contents.concat());
    }

    #[test]
    fn test_multibyte_text_around_matches() {
        let mut html = format!("héllo {} wörld", placeholders(&[0]));
        let mut replacements = Replacements::new();
        assert!(replacements.is_empty());
        replacements.push("✓");
        replacements.apply(&mut html);
        assert_eq!(html, "héllo ✓ wörld");
    }
}
