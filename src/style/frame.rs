//! `FrameStyle`: borders and padding around a block of text.

use crossterm::style::{style, Color, Stylize};
use serde::{Deserialize, Serialize};

use super::text::{fit, lines, truncate};
use super::Style;

/// Border drawn around a framed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderKind {
    /// No border.
    #[default]
    None,
    /// Single-line box drawing (`┌─┐`).
    Normal,
    /// Single line with rounded corners (`╭─╮`).
    Rounded,
    /// Double line (`╔═╗`).
    Double,
    /// Heavy line (`┏━┓`).
    Thick,
}

/// Glyph set for a border.
#[derive(Debug, Clone, Copy)]
struct Glyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
}

impl BorderKind {
    const fn glyphs(self) -> Option<Glyphs> {
        let (top_left, top_right, bottom_left, bottom_right, horizontal, vertical) = match self {
            Self::None => return None,
            Self::Normal => ('┌', '┐', '└', '┘', '─', '│'),
            Self::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
            Self::Double => ('╔', '╗', '╚', '╝', '═', '║'),
            Self::Thick => ('┏', '┓', '┗', '┛', '━', '┃'),
        };
        Some(Glyphs {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            horizontal,
            vertical,
        })
    }

    /// Cells taken by the border on each side.
    pub const fn thickness(self) -> u16 {
        match self {
            Self::None => 0,
            _ => 1,
        }
    }
}

/// A border, uniform padding and an optional border color.
///
/// The default is a bare style: no border, no padding, no color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    /// Border kind.
    pub border: BorderKind,
    /// Blank cells between the border and the content, on every side.
    pub padding: u16,
    /// Border foreground color.
    pub border_color: Option<Color>,
}

impl FrameStyle {
    /// No border and no padding.
    pub const fn plain() -> Self {
        Self {
            border: BorderKind::None,
            padding: 0,
            border_color: None,
        }
    }

    /// A border of the given kind.
    pub const fn bordered(border: BorderKind) -> Self {
        Self {
            border,
            padding: 0,
            border_color: None,
        }
    }

    /// Set the padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Set the border color.
    #[must_use]
    pub const fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    fn paint(&self, s: String) -> String {
        match self.border_color {
            Some(color) => style(s).with(color).to_string(),
            None => s,
        }
    }

    /// Overhead on one side: border plus padding.
    const fn side(&self) -> u16 {
        self.border.thickness().saturating_add(self.padding)
    }
}

impl Style for FrameStyle {
    fn frame_size(&self) -> (u16, u16) {
        let both = self.side().saturating_mul(2);
        (both, both)
    }

    fn render(&self, text: &str, width: u16, height: u16) -> String {
        if width == 0 || height == 0 {
            return String::new();
        }

        let (fx, fy) = self.frame_size();
        let content_w = usize::from(width.saturating_sub(fx));
        let content_h = usize::from(height.saturating_sub(fy));
        // Padding beyond the box edge is clipped, so never build more of it.
        let pad_x = usize::from(self.padding).min(usize::from(width));
        let pad_y = usize::from(self.padding).min(usize::from(height));
        let inner_w = content_w + 2 * pad_x;

        let mut rows: Vec<String> = Vec::with_capacity(content_h + 2 * pad_y + 2);
        let blank = " ".repeat(inner_w);
        rows.extend(std::iter::repeat_with(|| blank.clone()).take(pad_y));
        let gutter = " ".repeat(pad_x);
        let mut body = lines(text).take(content_h).map(|line| fit(line, content_w));
        for _ in 0..content_h {
            let line = body.next().unwrap_or_else(|| " ".repeat(content_w));
            rows.push(format!("{gutter}{line}{gutter}"));
        }
        rows.extend(std::iter::repeat_with(|| blank.clone()).take(pad_y));

        if let Some(g) = self.border.glyphs() {
            let edge: String = std::iter::repeat(g.horizontal).take(inner_w).collect();
            let left = self.paint(g.vertical.to_string());
            let right = left.clone();
            let top = self.paint(format!("{}{edge}{}", g.top_left, g.top_right));
            let bottom = self.paint(format!("{}{edge}{}", g.bottom_left, g.bottom_right));

            let mut framed = Vec::with_capacity(rows.len() + 2);
            framed.push(top);
            framed.extend(rows.into_iter().map(|row| format!("{left}{row}{right}")));
            framed.push(bottom);
            rows = framed;
        }

        // Frames larger than the box get clipped rather than overflowing it.
        let width = usize::from(width);
        rows.iter()
            .take(usize::from(height))
            .map(|row| truncate(row, width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
