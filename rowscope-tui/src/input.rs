//! Translation of crossterm events into grid input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rowscope::{Key, KeyCombo, Modifiers};

pub fn modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

/// Map a key event to a grid key combo. Keys the grid has no use for
/// (function keys, Insert, ...) map to `None`.
pub fn key_combo(event: &KeyEvent) -> Option<KeyCombo> {
    let key = match event.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };
    Some(KeyCombo::new(key, modifiers(event.modifiers)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_maps_to_space_key() {
        let event = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(key_combo(&event), Some(KeyCombo::key(Key::Space)));
    }

    #[test]
    fn test_modifiers_carried() {
        let event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(
            key_combo(&event),
            Some(KeyCombo::new(Key::Char('a'), Modifiers::CTRL))
        );
    }

    #[test]
    fn test_unsupported_key() {
        let event = KeyEvent::new(KeyCode::Insert, KeyModifiers::NONE);
        assert_eq!(key_combo(&event), None);
        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(key_combo(&event), None);
    }
}
