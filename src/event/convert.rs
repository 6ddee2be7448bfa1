//! Conversion from crossterm terminal events.
//!
//! The runtime that owns the terminal reads crossterm events; these
//! helpers turn them into [`Message`]s the router and layout tree
//! understand. Events with no counterpart map to `None`.

use crossterm::event::{self, Event, KeyEventKind};

use super::messages::{KeyCode, KeyModifiers, KeyPress, Message, MouseButton, MouseEvent, MouseKind};

impl Message {
    /// Convert a crossterm event to a message.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (not release or repeat)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }

                let code = convert_key_code(key_event.code)?;
                let modifiers = convert_modifiers(key_event.modifiers);

                Some(Self::Key(KeyPress::new(code, modifiers)))
            }

            Event::Mouse(mouse_event) => convert_mouse_event(mouse_event).map(Self::Mouse),

            Event::Resize(width, height) => Some(Self::Resize { width, height }),

            Event::FocusGained => Some(Self::FocusGained),

            Event::FocusLost => Some(Self::FocusLost),

            Event::Paste(text) => Some(Self::Paste(text)),
        }
    }
}

/// Convert crossterm `KeyCode` to our `KeyCode`.
fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::F(n) => KeyCode::F(n),
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Home => KeyCode::Home,
        event::KeyCode::End => KeyCode::End,
        event::KeyCode::PageUp => KeyCode::PageUp,
        event::KeyCode::PageDown => KeyCode::PageDown,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Delete => KeyCode::Delete,
        event::KeyCode::Insert => KeyCode::Insert,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Null => KeyCode::Null,
        _ => return None,
    })
}

/// Convert crossterm `KeyModifiers` to our `KeyModifiers`.
fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    out.set(KeyModifiers::SHIFT, mods.contains(event::KeyModifiers::SHIFT));
    out.set(KeyModifiers::CONTROL, mods.contains(event::KeyModifiers::CONTROL));
    out.set(KeyModifiers::ALT, mods.contains(event::KeyModifiers::ALT));
    out.set(KeyModifiers::SUPER, mods.contains(event::KeyModifiers::SUPER));
    out
}

/// Convert crossterm `MouseEvent` to our `MouseEvent`.
fn convert_mouse_event(mouse: event::MouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        event::MouseEventKind::Down(button) => MouseKind::Down(convert_mouse_button(button)),
        event::MouseEventKind::Up(button) => MouseKind::Up(convert_mouse_button(button)),
        event::MouseEventKind::Moved => MouseKind::Moved(None),
        event::MouseEventKind::Drag(button) => MouseKind::Moved(Some(convert_mouse_button(button))),
        event::MouseEventKind::ScrollUp => MouseKind::Scroll(1),
        event::MouseEventKind::ScrollDown => MouseKind::Scroll(-1),
        _ => return None,
    };

    Some(MouseEvent {
        kind,
        x: mouse.column,
        y: mouse.row,
        modifiers: convert_modifiers(mouse.modifiers),
    })
}

/// Convert crossterm `MouseButton` to our `MouseButton`.
const fn convert_mouse_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}
