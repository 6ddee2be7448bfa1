//! ANSI-aware text measurement.
//!
//! Rendered panels may already contain escape sequences (colored borders of
//! nested trees, styled leaf output). Widths here count only visible
//! cells: escape sequences are zero-width and never split.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ESC: char = '\x1b';

/// A run of plain text or a single escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Escape(&'a str),
}

struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let len = if self.rest.starts_with(ESC) {
            escape_len(self.rest)
        } else {
            self.rest.find(ESC).unwrap_or(self.rest.len())
        };

        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        Some(if head.starts_with(ESC) {
            Segment::Escape(head)
        } else {
            Segment::Text(head)
        })
    }
}

const fn segments(s: &str) -> Segments<'_> {
    Segments { rest: s }
}

/// Byte length of the escape sequence at the start of `s`.
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.get(1) {
        // CSI: parameters, then a final byte in 0x40..=0x7E
        Some(b'[') => bytes[2..]
            .iter()
            .position(|b| (0x40..=0x7E).contains(b))
            .map_or(bytes.len(), |i| i + 3),
        // OSC: terminated by BEL or ST (ESC \)
        Some(b']') => {
            let body = &bytes[2..];
            body.iter()
                .enumerate()
                .find_map(|(i, &b)| match b {
                    0x07 => Some(i + 3),
                    0x1b if body.get(i + 1) == Some(&b'\\') => Some(i + 4),
                    _ => None,
                })
                .unwrap_or(bytes.len())
        }
        Some(_) => 1 + s[1..].chars().next().map_or(0, char::len_utf8),
        None => 1,
    }
}

/// Remove escape sequences, keeping visible text.
pub fn strip_ansi(s: &str) -> String {
    segments(s)
        .filter_map(|seg| match seg {
            Segment::Text(t) => Some(t),
            Segment::Escape(_) => None,
        })
        .collect()
}

/// Number of terminal cells `s` occupies on one line.
pub fn visible_width(s: &str) -> usize {
    segments(s)
        .map(|seg| match seg {
            Segment::Text(t) => t.width(),
            Segment::Escape(_) => 0,
        })
        .sum()
}

/// Widest line of a block.
pub fn block_width(text: &str) -> usize {
    lines(text).map(visible_width).max().unwrap_or(0)
}

/// Split a block into lines, accepting both `\n` and `\r\n`.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Cut a line down to at most `width` visible cells.
///
/// Escape sequences past the cut are kept so styles opened before it are
/// still closed. A wide grapheme that would straddle the limit is dropped.
pub fn truncate(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut used = 0;
    let mut full = false;

    for seg in segments(line) {
        match seg {
            Segment::Escape(e) => out.push_str(e),
            Segment::Text(_) if full => {}
            Segment::Text(t) => {
                for grapheme in t.graphemes(true) {
                    let w = grapheme.width();
                    if used + w > width {
                        full = true;
                        break;
                    }
                    out.push_str(grapheme);
                    used += w;
                }
            }
        }
    }

    out
}

/// Truncate or right-pad a line to exactly `width` visible cells.
pub fn fit(line: &str, width: usize) -> String {
    let mut out = truncate(line, width);
    let used = visible_width(&out);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";

    #[test]
    fn test_visible_width_ignores_escapes() {
        assert_eq!(visible_width("hello"), 5);
        assert_eq!(visible_width(&format!("{RED}hello{RESET}")), 5);
        assert_eq!(visible_width("\x1b]0;title\x07ok"), 2);
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi(&format!("a{RED}b{RESET}c")), "abc");
        assert_eq!(strip_ansi("plain"), "plain");
        // An unterminated sequence swallows the rest of the line
        assert_eq!(strip_ansi("ok\x1b[31"), "ok");
    }

    #[test]
    fn test_truncate_keeps_trailing_escapes() {
        let styled = format!("{RED}hello{RESET}");
        let cut = truncate(&styled, 3);
        assert_eq!(cut, format!("{RED}hel{RESET}"));
        assert_eq!(visible_width(&cut), 3);
    }

    #[test]
    fn test_truncate_wide_grapheme() {
        assert_eq!(truncate("日本", 3), "日");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_fit_pads_and_cuts() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdef", 4), "abcd");
        assert_eq!(fit("日本", 3), "日 ");
        assert_eq!(fit("", 2), "  ");
    }

    #[test]
    fn test_lines_and_block_width() {
        let text = "one\r\nthree\nxx";
        assert_eq!(lines(text).collect::<Vec<_>>(), ["one", "three", "xx"]);
        assert_eq!(block_width(text), 5);
        assert_eq!(block_width(""), 0);
    }
}
