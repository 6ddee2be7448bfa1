//! Style: framing and clipping of rendered blocks.
//!
//! Layout trees only need two things from a style: how many cells its frame
//! costs, and a way to fit text into a box of a given size. Anything that
//! provides those can frame a node; [`FrameStyle`] is the bundled
//! implementation (borders, padding, border color).

mod frame;
pub mod text;

pub use frame::{BorderKind, FrameStyle};

/// Presentation capability used by layout trees.
pub trait Style {
    /// Frame `text` into a block of `width` × `height` cells.
    ///
    /// Content is padded or clipped to the space left inside the frame, and
    /// the framed result never exceeds `width` columns or `height` lines.
    /// A zero-sized box renders as empty text.
    fn render(&self, text: &str, width: u16, height: u16) -> String;

    /// Horizontal and vertical overhead of the frame, in cells.
    fn frame_size(&self) -> (u16, u16);
}
