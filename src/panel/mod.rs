//! Panels: the composable units of a trellis UI, and the router that
//! switches between them.
//!
//! Anything that implements [`Panel`] can be registered in a [`Router`] or
//! added to a [`LayoutTree`](crate::layout::LayoutTree), and both of those
//! are panels themselves.

mod router;
mod traits;

pub use router::{Delegate, Initializer, Policy, Registry, Router};
pub use traits::{AsAny, Panel};
pub(crate) use traits::update_slot;
