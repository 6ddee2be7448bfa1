//! Layout: proportional sizing, block joining and the layout tree.
//!
//! Sizes are recomputed only when a [`Message::Resize`](crate::Message)
//! arrives. Between resizes a tree renders from the boxes it cached.

mod join;
mod size;
mod tree;

pub use join::{join_horizontal, join_vertical};
pub use size::{Fraction, Size};
pub use tree::{LayoutNode, LayoutTree, Orientation};
