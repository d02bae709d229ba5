//! Per-line token map with incremental re-tokenization

use std::ops::Range;

use tracing::warn;

use crate::diagnostics::Line;
use crate::trace_operation_debug;
use crate::tracing::span_names;

use super::token::HighlightingToken;
use super::tokenizer::Tokenizer;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LineInfo {
    start: usize,
    tokens: Vec<HighlightingToken>,
}

/// Tokens of a text, grouped by line.
///
/// Line 1 starts at byte 0 and every `'\n'` starts a new line, so a text
/// ending in a newline has an empty last line. A token spanning several lines
/// is listed on each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokenMap {
    lines: Vec<LineInfo>,
    len: usize,
}

fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(index, _)| index + 1))
        .collect()
}

fn empty_lines(text: &str) -> Vec<LineInfo> {
    line_starts(text)
        .into_iter()
        .map(|start| LineInfo {
            start,
            tokens: Vec::new(),
        })
        .collect()
}

impl LineTokenMap {
    /// Tokenizes the whole of `text`.
    pub fn new(text: &str, tokenizer: &impl Tokenizer) -> Self {
        let mut map = Self {
            lines: empty_lines(text),
            len: text.len(),
        };
        let all = 1..map.last_line() + 1;
        map.add_tokens(tokenizer.tokenize(1, 1, text), &all);
        map
    }

    /// Number of the last line.
    #[must_use]
    pub fn last_line(&self) -> Line {
        self.lines.len()
    }

    /// Byte offset where `line` starts.
    #[must_use]
    pub fn start_of_line(&self, line: Line) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(|info| info.start)
    }

    /// Byte offset just past `line`, including its newline.
    #[must_use]
    pub fn end_of_line(&self, line: Line) -> usize {
        self.lines.get(line).map_or(self.len, |next| next.start)
    }

    /// Line containing byte `index`.
    #[must_use]
    pub fn line_of(&self, index: usize) -> Line {
        self.lines.partition_point(|info| info.start <= index).max(1)
    }

    /// Lines touched by a byte range; an empty range touches the line it sits on.
    ///
    /// Returns an empty range if `range` lies outside the text.
    #[must_use]
    pub fn line_range(&self, range: Range<usize>) -> Range<Line> {
        if range.start > self.len || range.end > self.len || range.start > range.end {
            return 1..1;
        }
        let first = self.line_of(range.start);
        let last = if range.is_empty() {
            first
        } else {
            self.line_of(range.end - 1)
        };
        first..last + 1
    }

    /// Tokens on `line`, in column order.
    #[must_use]
    pub fn tokens_on_line(&self, line: Line) -> &[HighlightingToken] {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map_or(&[], |info| info.tokens.as_slice())
    }

    /// Tokens on `line` together with the byte range each covers on that line.
    #[must_use]
    pub fn tokens_at_line(&self, line: Line) -> Vec<(HighlightingToken, Range<usize>)> {
        let Some(start) = self.start_of_line(line) else {
            return Vec::new();
        };
        let end = self.end_of_line(line);
        self.tokens_on_line(line)
            .iter()
            .map(|token| {
                let from = if token.span.line == line {
                    start + token.span.column - 1
                } else {
                    start
                };
                let to = if token.span.end_line() == line {
                    start + token.span.end_column - 1
                } else {
                    end
                };
                let from = from.min(self.len);
                (*token, from..to.clamp(from, self.len))
            })
            .collect()
    }

    /// Tokens overlapping a byte range, each listed once.
    #[must_use]
    pub fn tokens_in_range(&self, range: Range<usize>) -> Vec<HighlightingToken> {
        let mut tokens: Vec<_> = self
            .line_range(range.clone())
            .flat_map(|line| self.tokens_at_line(line))
            .filter(|(_, covered)| covered.start < range.end && covered.end > range.start)
            .map(|(token, _)| token)
            .collect();
        tokens.dedup();
        tokens
    }

    /// Brings the map up to date after `text` was edited.
    ///
    /// `edited` is the byte range of the replacement in the new text and
    /// `change_in_length` the difference between the new and old text lengths.
    /// Lines outside the edit keep their tokens, shifted by the change in line
    /// count. Lines around the edit are re-tokenized as far as multi-line
    /// tokens reach, and to the start or end of the text when the edit touches
    /// a block comment bracket.
    ///
    /// Returns the lines whose tokens were recomputed. Arguments that do not
    /// describe an edit of the mapped text leave the map unchanged and return
    /// an empty range.
    pub fn process_edit(
        &mut self,
        text: &str,
        edited: Range<usize>,
        change_in_length: isize,
        tokenizer: &impl Tokenizer,
    ) -> Range<Line> {
        let _span = trace_operation_debug!(
            span_names::HIGHLIGHT_EDIT,
            start = edited.start,
            end = edited.end,
            change_in_length
        )
        .entered();

        let old_end = change_in_length
            .checked_neg()
            .and_then(|undo| Some((edited.end.checked_add_signed(undo)?, undo)))
            .filter(|&(old_end, undo)| {
                edited.start <= edited.end
                    && edited.end <= text.len()
                    && old_end >= edited.start
                    && old_end <= self.len
                    && text.len().checked_add_signed(undo) == Some(self.len)
            })
            .map(|(old_end, _)| old_end);
        let Some(old_end) = old_end else {
            warn!(
                start = edited.start,
                end = edited.end,
                change_in_length,
                "Edit does not match the highlighted text"
            );
            return 1..1;
        };

        // The line holding `old_end` is joined to the replacement as well.
        let old_lines = self.line_of(edited.start)..self.line_of(old_end) + 1;
        let (before, after) = self.rescan_offsets(&old_lines);

        let mut lines = empty_lines(text);
        let change_in_lines = lines.len().cast_signed() - self.lines.len().cast_signed();
        for (index, info) in std::mem::take(&mut self.lines).into_iter().enumerate() {
            let line = index + 1;
            if line < old_lines.start {
                if let Some(target) = lines.get_mut(index) {
                    target.tokens = info.tokens;
                }
            } else if line >= old_lines.end
                && let Some(target) = index
                    .checked_add_signed(change_in_lines)
                    .and_then(|new_index| lines.get_mut(new_index))
            {
                target.tokens = info
                    .tokens
                    .into_iter()
                    .map(|token| HighlightingToken {
                        span: token.span.shifted(change_in_lines),
                        ..token
                    })
                    .collect();
            }
        }
        self.lines = lines;
        self.len = text.len();

        let last = self.last_line();
        let new_end = old_lines
            .end
            .saturating_add_signed(change_in_lines)
            .max(old_lines.start);
        let (opens, closes) = comment_brackets(text, &edited);
        let first = if closes {
            1
        } else {
            old_lines.start.saturating_sub(before).max(1)
        };
        let mut end = if opens {
            last + 1
        } else {
            (new_end + after).min(last + 1)
        };
        if first >= end {
            return first..first;
        }

        let from = self.lines[first - 1].start;
        let to = self.end_of_line(end - 1);
        let mut tokens = tokenizer.tokenize(first, 1, &text[from..to]);
        // A token still open at the end of the region, such as a comment
        // whose closing bracket was just overwritten, continues below it.
        if end <= last
            && tokens
                .last()
                .is_some_and(|token| token.span.end_line() >= end)
        {
            end = last + 1;
            tokens = tokenizer.tokenize(first, 1, &text[from..]);
        }
        for info in &mut self.lines[first - 1..end - 1] {
            info.tokens.clear();
        }
        self.add_tokens(tokens, &(first..end));
        first..end
    }

    /// How many lines before and after `lines` multi-line tokens reach.
    fn rescan_offsets(&self, lines: &Range<Line>) -> (usize, usize) {
        if lines.is_empty() {
            return (0, 0);
        }
        let mut start = lines.start;
        while start > 1
            && self
                .tokens_on_line(start)
                .first()
                .is_some_and(|token| token.span.line < start)
        {
            start -= 1;
        }
        let mut end = lines.end - 1;
        while end < self.last_line()
            && self
                .tokens_on_line(end)
                .last()
                .is_some_and(|token| token.span.end_line() > end)
        {
            end += 1;
        }
        (lines.start - start, end + 1 - lines.end)
    }

    fn add_tokens(&mut self, tokens: Vec<HighlightingToken>, within: &Range<Line>) {
        for token in tokens {
            for line in token.span.line..=token.span.end_line() {
                if within.contains(&line)
                    && let Some(info) = self.lines.get_mut(line - 1)
                {
                    info.tokens.push(token);
                }
            }
        }
    }
}

/// Whether the edit (or, for a deletion, the characters either side of it)
/// opens or closes a block comment.
fn comment_brackets(text: &str, edited: &Range<usize>) -> (bool, bool) {
    let bytes = text.as_bytes();
    let scan = if edited.is_empty() {
        edited.start.saturating_sub(1)..(edited.end + 1).min(bytes.len())
    } else {
        edited.clone()
    };
    let (mut opens, mut closes) = (false, false);
    for index in scan {
        let previous = index.checked_sub(1).and_then(|i| bytes.get(i));
        let next = bytes.get(index + 1);
        match bytes.get(index) {
            Some(b'{') if next == Some(&b'-') => opens = true,
            Some(b'-') if previous == Some(&b'{') => opens = true,
            Some(b'-') if next == Some(&b'}') => closes = true,
            Some(b'}') if previous == Some(&b'-') => closes = true,
            _ => {}
        }
    }
    (opens, closes)
}
