//! Joining rendered blocks side by side or on top of each other.
//!
//! Blocks are centered on the cross axis. When the leftover space is odd,
//! the extra line or column goes after the block.

use crate::style::text::{block_width, lines, visible_width};

/// Place blocks left to right, centering them vertically.
///
/// Every block is padded to its own widest line so columns stay aligned.
pub fn join_horizontal<S: AsRef<str>>(blocks: &[S]) -> String {
    let columns: Vec<(Vec<&str>, usize)> = blocks
        .iter()
        .map(|b| {
            let text = b.as_ref();
            (block_lines(text), block_width(text))
        })
        .collect();

    let height = columns.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let mut rows = vec![String::new(); height];

    for (block, width) in &columns {
        let top = (height - block.len()) / 2;
        for (i, row) in rows.iter_mut().enumerate() {
            let line = i.checked_sub(top).and_then(|j| block.get(j)).copied();
            let line = line.unwrap_or("");
            row.push_str(line);
            pad(row, width.saturating_sub(visible_width(line)));
        }
    }

    rows.join("\n")
}

/// Stack blocks top to bottom, centering them horizontally.
pub fn join_vertical<S: AsRef<str>>(blocks: &[S]) -> String {
    let width = blocks
        .iter()
        .map(|b| block_width(b.as_ref()))
        .max()
        .unwrap_or(0);

    let mut rows = Vec::new();
    for block in blocks {
        for line in block_lines(block.as_ref()) {
            let extra = width.saturating_sub(visible_width(line));
            let left = extra / 2;
            let mut row = String::with_capacity(line.len() + extra);
            pad(&mut row, left);
            row.push_str(line);
            pad(&mut row, extra - left);
            rows.push(row);
        }
    }

    rows.join("\n")
}

/// Lines of a block; the empty block has none.
fn block_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        lines(text).collect()
    }
}

fn pad(row: &mut String, n: usize) {
    row.extend(std::iter::repeat(' ').take(n));
}
