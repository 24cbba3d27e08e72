//! Keyboard event types.
//!
//! Only the keys the default input mapping understands are modelled here;
//! translating raw terminal bytes into events is the host's concern.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
        /// Super/Windows/Command key.
        const SUPER = 0b0000_1000;
        /// Meta key (distinct from Alt on some systems).
        const META = 0b0001_0000;
    }
}

/// A key code representing a keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Delete key.
    Delete,
    /// Escape key.
    Esc,
    /// A character key (includes space).
    Char(char),
}

impl KeyCode {
    /// Check if this is a character key.
    #[must_use]
    pub fn is_char(&self) -> bool {
        matches!(self, Self::Char(_))
    }

    /// Check if this is a navigation key (arrows, home, end).
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::Up | Self::Down | Self::Home | Self::End
        )
    }

    /// Get the character if this is a character key.
    #[must_use]
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a character key event.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a Ctrl+key event.
    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    /// Check if Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Check if a meta-like modifier (Super or Meta) is held.
    #[must_use]
    pub fn meta(&self) -> bool {
        self.modifiers
            .intersects(KeyModifiers::SUPER | KeyModifiers::META)
    }

    /// Check if this is Escape.
    #[must_use]
    pub fn is_esc(&self) -> bool {
        self.code == KeyCode::Esc
    }

    /// Check if this is Enter (the key or a raw `\r`/`\n` character).
    #[must_use]
    pub fn is_enter(&self) -> bool {
        matches!(
            self.code,
            KeyCode::Enter | KeyCode::Char('\r') | KeyCode::Char('\n')
        )
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_creation() {
        let event = KeyEvent::char('a');
        assert_eq!(event.code, KeyCode::Char('a'));
        assert!(event.modifiers.is_empty());
    }

    #[test]
    fn test_key_event_modifiers() {
        let event = KeyEvent::with_ctrl(KeyCode::Char('d'));
        assert!(event.ctrl());
        assert!(!event.alt());
        assert!(!event.meta());
    }

    #[test]
    fn test_meta_covers_super_and_meta() {
        let event = KeyEvent::new(KeyCode::Char('v'), KeyModifiers::SUPER);
        assert!(event.meta());
        let event = KeyEvent::new(KeyCode::Char('v'), KeyModifiers::META);
        assert!(event.meta());
    }

    #[test]
    fn test_enter_variants() {
        assert!(KeyEvent::key(KeyCode::Enter).is_enter());
        assert!(KeyEvent::char('\r').is_enter());
        assert!(KeyEvent::char('\n').is_enter());
        assert!(!KeyEvent::char('x').is_enter());
    }

    #[test]
    fn test_key_code_checks() {
        assert!(KeyCode::Char('x').is_char());
        assert!(KeyCode::Up.is_navigation());
        assert!(!KeyCode::Enter.is_navigation());
        assert_eq!(KeyCode::Char('q').char(), Some('q'));
        assert_eq!(KeyCode::Esc.char(), None);
    }

    #[test]
    fn test_key_event_from_char() {
        let event: KeyEvent = 'z'.into();
        assert_eq!(event.code, KeyCode::Char('z'));
    }
}
