//! Directive syntax parsing.
//!
//! Parses leaf directives (`::name[arguments]{options}`, anywhere in a line)
//! and the container form (`:::name` ... `:::`, whole lines).

use super::DirectiveArgs;

/// Leaf directive found within a line: `::name[arguments]{options}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LeafMatch {
    pub name: String,
    pub args: DirectiveArgs,
    /// Byte offset of the first colon.
    pub start: usize,
    /// Byte offset just past the invocation.
    pub end: usize,
}

/// Parsed container line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedDirective {
    /// Container opening: `:::name[arguments]{options}`
    ContainerStart {
        name: String,
        args: DirectiveArgs,
        colon_count: usize,
    },
    /// Container closing: `:::`
    ContainerEnd { colon_count: usize },
}

/// Find the first leaf directive in a line.
///
/// Returns `None` if the line contains no leaf directive. Runs of colons that
/// do not form one (URLs, `a: b`, single-colon text) are skipped.
pub(crate) fn parse_line(line: &str) -> Option<LeafMatch> {
    let mut search_from = 0;

    while let Some(offset) = line[search_from..].find(':') {
        let start = search_from + offset;
        let colon_count = line[start..].chars().take_while(|&c| c == ':').count();
        let after_colons = start + colon_count;

        if colon_count == 2
            && let Some((name, args, end)) = parse_invocation(line, after_colons)
        {
            return Some(LeafMatch {
                name,
                args,
                start,
                end,
            });
        }

        search_from = after_colons;
    }

    None
}

/// Parse `name[arguments]{options}` starting at byte offset `pos`.
///
/// Returns the name, arguments and the end offset.
fn parse_invocation(line: &str, mut pos: usize) -> Option<(String, DirectiveArgs, usize)> {
    let after_colons = &line[pos..];

    // Name ends at [, {, or anything that can't be part of a name
    let name_end = after_colons
        .find(|c: char| !is_name_char(c))
        .unwrap_or(after_colons.len());

    let name = &after_colons[..name_end];
    if name.is_empty() {
        return None;
    }

    pos += name_end;

    let (text, text_consumed) = parse_brackets(&line[pos..]);
    pos += text_consumed;

    let (options_str, options_consumed) = parse_braces(&line[pos..]);
    pos += options_consumed;

    Some((name.to_owned(), DirectiveArgs::parse(&text, &options_str), pos))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Check if a name is a valid directive name.
///
/// Valid names contain only alphanumeric characters, hyphens, and underscores.
pub(crate) fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

/// Parse text from brackets: `[text]`
///
/// Returns (text, `bytes_consumed`).
fn parse_brackets(s: &str) -> (String, usize) {
    parse_delimited(s, '[', ']')
}

/// Parse options from braces: `{key="value"}`
///
/// Returns (`options_str` without braces, `bytes_consumed`).
fn parse_braces(s: &str) -> (String, usize) {
    parse_delimited(s, '{', '}')
}

/// Find the matching closing delimiter, handling nesting.
fn parse_delimited(s: &str, open: char, close: char) -> (String, usize) {
    if !s.starts_with(open) {
        return (String::new(), 0);
    }

    let mut depth = 0;

    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return (s[1..i].to_owned(), i + 1);
            }
        }
    }

    (String::new(), 0)
}

/// Parse a whole line for a container directive.
///
/// Returns `None` if the line is not a container opening or closing.
pub(crate) fn parse_container_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim();

    if !trimmed.starts_with(":::") {
        return None;
    }

    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    let after_colons = trimmed[colon_count..].trim_start();

    if after_colons.is_empty() {
        return Some(ParsedDirective::ContainerEnd { colon_count });
    }

    let (name, args, end) = parse_invocation(after_colons, 0)?;

    // Anything after the invocation means this is not a directive line
    if !after_colons[end..].trim().is_empty() {
        return None;
    }

    Some(ParsedDirective::ContainerStart {
        name,
        args,
        colon_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_directive() {
        let leaf = parse_line("::snippet[hero]").unwrap();

        assert_eq!(leaf.start, 0);
        assert_eq!(leaf.end, 15);
        assert_eq!(leaf.name, "snippet");
        assert_eq!(leaf.args.text, "hero");
    }

    #[test]
    fn test_leaf_within_text() {
        let leaf = parse_line("Before ::snippet[cta] after").unwrap();

        assert_eq!((leaf.start, leaf.end), (7, 21));
        assert_eq!(leaf.name, "snippet");
    }

    #[test]
    fn test_leaf_with_options() {
        let leaf = parse_line(r#"::youtube[abc]{width="560"}"#).unwrap();

        assert_eq!(leaf.name, "youtube");
        assert_eq!(leaf.args.text, "abc");
        assert_eq!(leaf.args.get("width"), Some("560"));
    }

    #[test]
    fn test_leaf_argument_with_whitespace() {
        let leaf = parse_line("::snippet[my snippet]").unwrap();
        assert_eq!(leaf.args.text, "my snippet");
    }

    #[test]
    fn test_leaf_without_arguments() {
        let leaf = parse_line("::snippet").unwrap();

        assert_eq!((leaf.start, leaf.end), (0, 9));
        assert_eq!(leaf.args.text, "");
    }

    #[test]
    fn test_skips_non_directive_colons() {
        let leaf = parse_line("Note: see https://example.com ::snippet[x]").unwrap();

        assert_eq!(leaf.start, 30);
        assert_eq!(leaf.name, "snippet");
    }

    #[test]
    fn test_single_and_triple_colons_are_not_leaf() {
        assert!(parse_line(":kbd[Ctrl]").is_none());
        assert!(parse_line("text :::note[x] text").is_none());
    }

    #[test]
    fn test_multiple_directives_finds_first() {
        let leaf = parse_line("::a[1] ::b[2]").unwrap();
        assert_eq!((leaf.start, leaf.end), (0, 6));
        assert_eq!(leaf.name, "a");
    }

    #[test]
    fn test_container_start() {
        let directive = parse_container_line("::: note").unwrap();

        match directive {
            ParsedDirective::ContainerStart {
                name,
                args,
                colon_count,
            } => {
                assert_eq!(name, "note");
                assert_eq!(args.text, "");
                assert_eq!(colon_count, 3);
            }
            _ => panic!("expected container start"),
        }
    }

    #[test]
    fn test_container_with_arguments() {
        let directive = parse_container_line(":::snippet[hero]").unwrap();

        match directive {
            ParsedDirective::ContainerStart { name, args, .. } => {
                assert_eq!(name, "snippet");
                assert_eq!(args.text, "hero");
            }
            _ => panic!("expected container start"),
        }
    }

    #[test]
    fn test_container_end() {
        assert_eq!(
            parse_container_line(":::"),
            Some(ParsedDirective::ContainerEnd { colon_count: 3 })
        );
        assert_eq!(
            parse_container_line("::::  "),
            Some(ParsedDirective::ContainerEnd { colon_count: 4 })
        );
    }

    #[test]
    fn test_container_with_trailing_text_is_not_directive() {
        assert!(parse_container_line(":::note[x] trailing").is_none());
    }

    #[test]
    fn test_not_directive() {
        assert!(parse_line("regular text").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("key: value").is_none());
        assert!(parse_container_line("not a directive").is_none());
    }

    #[test]
    fn test_parse_brackets() {
        assert_eq!(parse_brackets("[hello]"), ("hello".to_owned(), 7));
        assert_eq!(parse_brackets("[hello] rest"), ("hello".to_owned(), 7));
        assert_eq!(
            parse_brackets("[nested [brackets]]"),
            ("nested [brackets]".to_owned(), 19)
        );
        assert_eq!(parse_brackets("no brackets"), (String::new(), 0));
        assert_eq!(parse_brackets("[unclosed"), (String::new(), 0));
    }

    #[test]
    fn test_parse_braces() {
        assert_eq!(parse_braces("{a=1}"), ("a=1".to_owned(), 5));
        assert_eq!(parse_braces("{b} rest"), ("b".to_owned(), 3));
        assert_eq!(parse_braces("no braces"), (String::new(), 0));
        assert_eq!(parse_braces("{unclosed"), (String::new(), 0));
    }

    #[test]
    fn test_is_valid_directive_name() {
        assert!(is_valid_directive_name("snippet"));
        assert!(is_valid_directive_name("my-directive"));
        assert!(is_valid_directive_name("directive_name"));
        assert!(is_valid_directive_name("directive123"));
        assert!(!is_valid_directive_name(""));
        assert!(!is_valid_directive_name("foo@bar"));
        assert!(!is_valid_directive_name("foo bar"));
    }
}
