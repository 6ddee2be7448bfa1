//! Recorder panels shared by unit tests.

use crate::event::{Cmd, Message};
use crate::layout::Size;
use crate::panel::Panel;

/// A panel that records what it receives.
///
/// Renders its text (the label unless set otherwise). A replying recorder
/// answers every message with a user message carrying its label; a recorder
/// built `with_init` returns `init:<label>` from `init`.
pub(crate) struct Recorder {
    label: &'static str,
    text: String,
    seen: Vec<Message>,
    reply: bool,
    init: bool,
}

impl Recorder {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            text: label.to_owned(),
            seen: Vec::new(),
            reply: false,
            init: false,
        }
    }

    pub(crate) const fn replying(mut self) -> Self {
        self.reply = true;
        self
    }

    pub(crate) const fn with_init(mut self) -> Self {
        self.init = true;
        self
    }

    pub(crate) fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn seen(&self) -> &[Message] {
        &self.seen
    }

    /// Size carried by the most recent resize.
    pub(crate) fn last_resize(&self) -> Option<Size> {
        self.seen.iter().rev().find_map(|msg| match *msg {
            Message::Resize { width, height } => Some(Size::new(width, height)),
            _ => None,
        })
    }
}

impl Panel for Recorder {
    fn init(&mut self) -> Option<Cmd> {
        self.init
            .then(|| Cmd::msg(Message::user(format!("init:{}", self.label))))
    }

    fn update(mut self: Box<Self>, msg: &Message) -> (Box<dyn Panel>, Option<Cmd>) {
        self.seen.push(msg.clone());
        let cmd = self.reply.then(|| Cmd::msg(Message::user(self.label)));
        (self, cmd)
    }

    fn render(&self) -> String {
        self.text.clone()
    }
}

/// Labels carried by the user messages in `cmd`, in order.
pub(crate) fn labels(cmd: Option<Cmd>) -> Vec<String> {
    cmd.map(Cmd::flatten)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|cmd| match cmd {
            Cmd::Msg(msg) => msg
                .payload::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| msg.payload::<String>().cloned()),
            _ => None,
        })
        .collect()
}
