//! Events: the messages panels receive and the commands they return.
//!
//! ```text
//! ┌─────────┐  Message   ┌────────┐  Message   ┌────────────┐
//! │ Runtime │ ─────────▶ │ Router │ ─────────▶ │ Panel(s)   │
//! └─────────┘            └────────┘            └────────────┘
//!      ▲                                              │
//!      │                  Option<Cmd>                 │
//!      └──────────────────────────────────────────────┘
//! ```
//!
//! The runtime executes commands and feeds their results back in as
//! messages on the same loop.

mod command;
mod convert;
mod messages;

pub use command::Cmd;
pub use messages::{
    KeyCode, KeyModifiers, KeyPress, Message, MouseButton, MouseEvent, MouseKind, Payload,
};
