//! Code fence tracking for directive parsing.
//!
//! Directive syntax inside code (fenced or indented blocks, inline code
//! spans) is documentation about directives, not an invocation, and must be
//! left untouched.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

/// An open code fence: the fence character and the length of its opening run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    marker: char,
    len: usize,
}

/// Tracks code fence state during line-by-line processing.
///
/// Fences use three or more backticks or tildes. A closing fence must use the
/// same character, be at least as long as the opening one and carry nothing
/// but whitespace after it.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        match self.open {
            Some(open) => {
                let run = marker_run(trimmed, open.marker);
                if run >= open.len && trimmed[run..].trim().is_empty() {
                    self.open = None;
                    return true;
                }
                false
            }
            None => {
                let Some(marker) = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))
                else {
                    return false;
                };
                let len = marker_run(trimmed, marker);
                if len < 3 {
                    return false;
                }
                self.open = Some(OpenFence { marker, len });
                true
            }
        }
    }
}

/// Byte ranges of inline code spans and indented code blocks in a document.
///
/// Fenced blocks are left to [`FenceTracker`], which also runs over container
/// bodies that are never parsed as a whole document.
#[derive(Debug, Default)]
pub(crate) struct CodeRanges {
    ranges: Vec<Range<usize>>,
}

impl CodeRanges {
    pub(crate) fn new(input: &str) -> Self {
        let ranges = Parser::new(input)
            .into_offset_iter()
            .filter_map(|(event, range)| match event {
                Event::Code(_) | Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)) => {
                    Some(range)
                }
                _ => None,
            })
            .collect();
        Self { ranges }
    }

    /// Whether byte offset `pos` of the document lies inside code.
    pub(crate) fn contains(&self, pos: usize) -> bool {
        // Ranges come out of the parser in document order and never overlap
        let idx = self.ranges.partition_point(|range| range.start <= pos);
        idx > 0 && self.ranges[idx - 1].contains(&pos)
    }
}

/// Length in bytes of the leading run of `marker` characters.
fn marker_run(s: &str, marker: char) -> usize {
    s.chars().take_while(|&c| c == marker).count() * marker.len_utf8()
}
