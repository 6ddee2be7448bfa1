//! Message types flowing through the update loop.
//!
//! Every event a panel can observe (key presses, resizes, navigation
//! requests, command results) is a [`Message`]. Messages are immutable and
//! cheap to clone, so containers can fan one message out to many children.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Key codes for keyboard input.
///
/// This is a simplified subset of crossterm's `KeyCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
    /// Null (Ctrl+Space on some terminals).
    Null,
}

impl KeyCode {
    /// Name used when formatting and parsing key bindings.
    fn name(self) -> String {
        match self {
            Self::Char(' ') => "space".to_string(),
            Self::Char(c) => c.to_string(),
            Self::F(n) => format!("f{n}"),
            Self::Backspace => "backspace".to_string(),
            Self::Enter => "enter".to_string(),
            Self::Left => "left".to_string(),
            Self::Right => "right".to_string(),
            Self::Up => "up".to_string(),
            Self::Down => "down".to_string(),
            Self::Home => "home".to_string(),
            Self::End => "end".to_string(),
            Self::PageUp => "pgup".to_string(),
            Self::PageDown => "pgdown".to_string(),
            Self::Tab => "tab".to_string(),
            Self::BackTab => "backtab".to_string(),
            Self::Delete => "delete".to_string(),
            Self::Insert => "insert".to_string(),
            Self::Esc => "esc".to_string(),
            Self::Null => "null".to_string(),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::Char(c));
        }

        Some(match name.to_ascii_lowercase().as_str() {
            "space" => Self::Char(' '),
            "backspace" => Self::Backspace,
            "enter" | "return" => Self::Enter,
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "home" => Self::Home,
            "end" => Self::End,
            "pgup" | "pageup" => Self::PageUp,
            "pgdown" | "pagedown" => Self::PageDown,
            "tab" => Self::Tab,
            "backtab" => Self::BackTab,
            "delete" | "del" => Self::Delete,
            "insert" => Self::Insert,
            "esc" | "escape" => Self::Esc,
            "null" => Self::Null,
            other => {
                Self::F(other.strip_prefix('f')?.parse::<u8>().ok()?)
            }
        })
    }
}

bitflags! {
    /// Key modifiers held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0001;
        /// Control key held.
        const CONTROL = 0b0010;
        /// Alt/Option key held.
        const ALT = 0b0100;
        /// Super/Command/Windows key held.
        const SUPER = 0b1000;
    }
}

/// A key press: a key code plus the modifiers held with it.
///
/// Key presses format as the familiar `ctrl+c` / `alt+enter` notation and
/// parse back from it, which is how key bindings appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during the key press.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Create a key press.
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// A character typed without modifiers.
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// A character typed with Control held.
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CONTROL, "ctrl+"),
            (KeyModifiers::ALT, "alt+"),
            (KeyModifiers::SHIFT, "shift+"),
            (KeyModifiers::SUPER, "super+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        f.write_str(&self.code.name())
    }
}

impl FromStr for KeyPress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::KeyBinding(s.to_string());

        // A "+" alone or right after a separator is the plus key ("+", "ctrl++").
        let (prefix, key) = match s.strip_suffix('+') {
            Some("") => ("", "+"),
            Some(rest) if rest.ends_with('+') => (rest, "+"),
            _ => s.rsplit_once('+').unwrap_or(("", s)),
        };

        let mut modifiers = KeyModifiers::empty();
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                "super" | "cmd" | "win" => KeyModifiers::SUPER,
                _ => return Err(invalid()),
            };
        }

        let code = KeyCode::from_name(key).ok_or_else(invalid)?;
        Ok(Self::new(code, modifiers))
    }
}

impl TryFrom<String> for KeyPress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyPress> for String {
    fn from(key: KeyPress) -> Self {
        key.to_string()
    }
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

/// What happened with the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    /// Button pressed.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Pointer moved, optionally dragging with a button held.
    Moved(Option<MouseButton>),
    /// Wheel scrolled (positive = up, negative = down).
    Scroll(i16),
}

/// Mouse event details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseKind,
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
    /// Key modifiers held during the mouse event.
    pub modifiers: KeyModifiers,
}

/// A shared, type-erased value carried by [`Message::User`].
///
/// Command results and host-defined events travel as payloads. Cloning a
/// payload only bumps a reference count.
#[derive(Clone)]
pub struct Payload(Arc<dyn Any + Send + Sync>);

impl Payload {
    /// Wrap a value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Check whether the value has type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Payload(..)")
    }
}

/// An immutable event delivered to panels.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key was pressed.
    Key(KeyPress),

    /// Mouse activity.
    Mouse(MouseEvent),

    /// The available area changed.
    ///
    /// Delivered by the runtime for terminal size changes and synthesized
    /// by layout trees for their children.
    Resize {
        /// Width in columns.
        width: u16,
        /// Height in rows.
        height: u16,
    },

    /// Request to move focus to the named panel.
    NavigateTo(String),

    /// Terminal focus gained.
    FocusGained,

    /// Terminal focus lost.
    FocusLost,

    /// Paste event (bracketed paste).
    Paste(String),

    /// Host-defined message, usually the result of a deferred command.
    User(Payload),
}

impl Message {
    /// Build a key message.
    pub const fn key(key: KeyPress) -> Self {
        Self::Key(key)
    }

    /// Build a resize message.
    pub const fn resize(width: u16, height: u16) -> Self {
        Self::Resize { width, height }
    }

    /// Build a navigation request.
    pub fn navigate(name: impl Into<String>) -> Self {
        Self::NavigateTo(name.into())
    }

    /// Wrap a host value.
    pub fn user<T: Any + Send + Sync>(value: T) -> Self {
        Self::User(Payload::new(value))
    }

    /// Borrow the user payload if this is a [`Message::User`] of type `T`.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        match self {
            Self::User(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// The key press, if this is a key message.
    pub const fn as_key(&self) -> Option<&KeyPress> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_display() {
        assert_eq!(KeyPress::ctrl('c').to_string(), "ctrl+c");
        assert_eq!(KeyPress::char('q').to_string(), "q");
        assert_eq!(KeyPress::plain(KeyCode::Enter).to_string(), "enter");
        assert_eq!(
            KeyPress::new(KeyCode::Tab, KeyModifiers::ALT | KeyModifiers::SHIFT).to_string(),
            "alt+shift+tab"
        );
    }

    #[test]
    fn test_key_press_parse() {
        assert_eq!("ctrl+c".parse::<KeyPress>().unwrap(), KeyPress::ctrl('c'));
        assert_eq!("Esc".parse::<KeyPress>().unwrap(), KeyPress::plain(KeyCode::Esc));
        assert_eq!("f5".parse::<KeyPress>().unwrap(), KeyPress::plain(KeyCode::F(5)));
        assert_eq!(
            "ctrl++".parse::<KeyPress>().unwrap(),
            KeyPress::new(KeyCode::Char('+'), KeyModifiers::CONTROL)
        );
        assert_eq!("space".parse::<KeyPress>().unwrap(), KeyPress::char(' '));
    }

    #[test]
    fn test_key_press_parse_rejects_garbage() {
        assert!("hyper+c".parse::<KeyPress>().is_err());
        assert!("f256".parse::<KeyPress>().is_err());
        assert!("ctrl+".parse::<KeyPress>().is_err());
        assert!("nonsense".parse::<KeyPress>().is_err());
        assert!("".parse::<KeyPress>().is_err());
    }

    #[test]
    fn test_plus_key_parses() {
        assert_eq!("+".parse::<KeyPress>().unwrap(), KeyPress::char('+'));
        assert_eq!(
            "alt+shift++".parse::<KeyPress>().unwrap(),
            KeyPress::new(KeyCode::Char('+'), KeyModifiers::ALT | KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_key_press_string_roundtrip() {
        let mut codes = vec![
            KeyCode::Backspace,
            KeyCode::Enter,
            KeyCode::Left,
            KeyCode::Right,
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::PageUp,
            KeyCode::PageDown,
            KeyCode::Tab,
            KeyCode::BackTab,
            KeyCode::Delete,
            KeyCode::Insert,
            KeyCode::Esc,
            KeyCode::Null,
        ];
        codes.extend((0..=u8::MAX).map(KeyCode::F));
        codes.extend(['a', 'Z', 'f', '+', '-', ' ', '1', 'é', '日'].map(KeyCode::Char));

        for code in codes {
            for modifiers in [
                KeyModifiers::empty(),
                KeyModifiers::CONTROL,
                KeyModifiers::ALT | KeyModifiers::SHIFT,
                KeyModifiers::all(),
            ] {
                let key = KeyPress::new(code, modifiers);
                let text = key.to_string();
                assert_eq!(text.parse::<KeyPress>().ok(), Some(key), "{text:?}");
            }
        }
    }

    #[test]
    fn test_plus_quit_key_survives_config_roundtrip() {
        let config = crate::config::RouterConfig {
            quit_key: KeyPress::char('+'),
        };
        let text = toml::to_string(&config).unwrap();
        let back: crate::config::RouterConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_payload_downcast() {
        let msg = Message::user(42_u32);
        assert_eq!(msg.payload::<u32>(), Some(&42));
        assert!(msg.payload::<String>().is_none());

        let cloned = msg.clone();
        assert_eq!(cloned.payload::<u32>(), Some(&42));
        assert!(Message::resize(1, 1).payload::<u32>().is_none());
    }
}
