//! Deferred commands returned from `init` and `update`.
//!
//! A command is an opaque unit of work that the runtime executes off the
//! update loop. Whatever it produces re-enters the loop as an ordinary
//! [`Message`]. Panels return `Option<Cmd>`; `None` means "nothing to do".

use std::fmt;

use super::messages::Message;

/// A deferred command for the runtime to execute.
pub enum Cmd {
    /// Terminate the program.
    Quit,

    /// Deliver a message on the next loop iteration.
    Msg(Message),

    /// Run a blocking operation off the loop; its result re-enters as a message.
    Task(Box<dyn FnOnce() -> Message + Send>),

    /// Several commands with no ordering guarantee between them.
    Batch(Vec<Cmd>),
}

impl fmt::Debug for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "Quit"),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Task(_) => write!(f, "Task(...)"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
        }
    }
}

impl Cmd {
    /// Create a quit command.
    #[inline]
    pub const fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[inline]
    pub const fn msg(m: Message) -> Self {
        Self::Msg(m)
    }

    /// Create a command that asks the router to focus `name`.
    pub fn navigate(name: impl Into<String>) -> Self {
        Self::Msg(Message::navigate(name))
    }

    /// Create a background task command.
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> Message + Send + 'static,
    {
        Self::Task(Box::new(f))
    }

    /// Combine optional commands into one.
    ///
    /// Absent commands are dropped. Returns `None` when nothing is left and
    /// the single command itself when only one remains. The relative order
    /// of the remaining commands is preserved.
    pub fn batch<I>(cmds: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        let mut cmds: Vec<Self> = cmds.into_iter().flatten().collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Self::Batch(cmds)),
        }
    }

    /// Check whether this is a quit command.
    pub const fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Stable name for logging.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Msg(_) => "Msg",
            Self::Task(_) => "Task",
            Self::Batch(_) => "Batch",
        }
    }

    /// Count the atomic commands, looking through batches.
    pub fn count(&self) -> usize {
        match self {
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }

    /// Unroll nested batches into a flat list of atomic commands, in order.
    pub fn flatten(self) -> Vec<Self> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.flatten_into(out);
                }
            }
            cmd => out.push(cmd),
        }
    }
}
