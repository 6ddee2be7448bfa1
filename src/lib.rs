//! # Trellis
//!
//! A panel router and proportional layout tree for Elm-style terminal UIs.
//!
//! Trellis sits between a model-update-view runtime and the panels of an
//! application. It does not own the terminal or the event loop; it decides
//! which panel sees a message and where each panel's text lands on screen.
//!
//! ## Core Concepts
//!
//! - **Panels**: state machines that consume a [`Message`], return their next
//!   state plus an optional [`Cmd`], and render text
//! - **Router**: named panels with one in focus; a delegate hook sees every
//!   message first
//! - **Layout tree**: rows and columns of panels sized as fractions of the
//!   available space, re-flowed on every resize
//! - **Styles**: borders and padding, measured in visible cells so nested
//!   colored output clips correctly
//!
//! ## Example
//!
//! ```rust,ignore
//! use trellis::{LayoutTree, Message, Orientation, Panel, Policy, Router};
//!
//! let mut main = LayoutTree::new(Orientation::Horizontal, 1.0, 1.0);
//! main.add_node(sidebar, 0.3, 1.0).add_node(editor, 0.7, 1.0);
//!
//! let mut router = Router::new();
//! router.register("main", main, Policy::Addressable);
//! router.set_focus("main");
//!
//! let (router, cmd) = Box::new(router).update(&Message::resize(120, 40));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod panel;
pub mod style;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use config::{Config, RouterConfig, StyleConfig};
pub use error::{Error, Result};
pub use event::{
    Cmd, KeyCode, KeyModifiers, KeyPress, Message, MouseButton, MouseEvent, MouseKind, Payload,
};
pub use layout::{Fraction, LayoutNode, LayoutTree, Orientation, Size};
pub use panel::{Panel, Policy, Registry, Router};
pub use style::{BorderKind, FrameStyle, Style};
