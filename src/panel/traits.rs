//! The `Panel` trait: the unit of UI composition.
//!
//! A panel is a state machine. The runtime calls [`Panel::init`] once,
//! then [`Panel::update`] for every message and [`Panel::render`] after each
//! update. Updates take ownership of the old state and hand back the new
//! one, so a container can swap a child's slot without ever holding two
//! versions of it.

use std::any::Any;

use crate::event::{Cmd, Message};

/// Type-erasure helper so registered panels can be downcast.
///
/// Implemented for every `'static` type; panel authors never write it.
pub trait AsAny: Any {
    /// Upcast to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Upcast to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast a boxed value to `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A UI component driven by messages.
///
/// Leaf panels, layout trees and routers all implement this trait, which
/// is what lets them nest inside one another.
pub trait Panel: AsAny {
    /// Startup work, called once before the first message.
    fn init(&mut self) -> Option<Cmd> {
        None
    }

    /// Consume the current state and a message; return the new state and
    /// an optional command.
    ///
    /// Most panels return `self`, but an update may also replace the panel
    /// with a different type.
    fn update(self: Box<Self>, msg: &Message) -> (Box<dyn Panel>, Option<Cmd>);

    /// Render the current state as text. Lines are separated by `\n`.
    fn render(&self) -> String;
}

impl dyn Panel {
    /// Borrow the panel as `T` if that is its concrete type.
    pub fn downcast_ref<T: Panel>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the panel as `T` if that is its concrete type.
    pub fn downcast_mut<T: Panel>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Check whether the panel's concrete type is `T`.
    pub fn is<T: Panel>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Take the panel back as `T`, or get it back unchanged.
    pub fn downcast<T: Panel>(self: Box<Self>) -> Result<Box<T>, Box<Self>> {
        if self.is::<T>() {
            Ok(self
                .into_any()
                .downcast::<T>()
                .unwrap_or_else(|_| unreachable!("type checked above")))
        } else {
            Err(self)
        }
    }
}

/// Stand-in left in a container slot while its occupant is being updated.
///
/// Zero-sized, so boxing it does not allocate.
pub(crate) struct Vacant;

impl Panel for Vacant {
    fn update(self: Box<Self>, _msg: &Message) -> (Box<dyn Panel>, Option<Cmd>) {
        (self, None)
    }

    fn render(&self) -> String {
        String::new()
    }
}

/// Update the panel in `slot` in place of the old one.
///
/// The old state is moved out (leaving [`Vacant`] behind), updated, and the
/// result written back.
pub(crate) fn update_slot(slot: &mut Box<dyn Panel>, msg: &Message) -> Option<Cmd> {
    let current = std::mem::replace(slot, Box::new(Vacant));
    let (next, cmd) = current.update(msg);
    *slot = next;
    cmd
}
