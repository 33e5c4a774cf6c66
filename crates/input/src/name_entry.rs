//! Player name prompt shown after game over.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 16;

/// Result of feeding one key to a [`NameEntry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryOutcome {
    /// Still editing
    Editing,
    /// Enter pressed with a non-empty name
    Submitted(String),
    /// Esc pressed
    Cancelled,
}

/// Bounded single-line editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    buffer: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> NameEntryOutcome {
        if key.kind == KeyEventKind::Release {
            return NameEntryOutcome::Editing;
        }

        match key.code {
            KeyCode::Enter => {
                let name = self.buffer.trim();
                if name.is_empty() {
                    NameEntryOutcome::Editing
                } else {
                    NameEntryOutcome::Submitted(name.to_string())
                }
            }
            KeyCode::Esc => NameEntryOutcome::Cancelled,
            KeyCode::Backspace => {
                self.buffer.pop();
                NameEntryOutcome::Editing
            }
            KeyCode::Char(c)
                if !c.is_control()
                    && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if self.buffer.chars().count() < MAX_NAME_LEN {
                    self.buffer.push(c);
                }
                NameEntryOutcome::Editing
            }
            _ => NameEntryOutcome::Editing,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(entry: &mut NameEntry, s: &str) {
        for c in s.chars() {
            entry.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_and_submit() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, " ada ");
        assert_eq!(
            entry.handle_key(KeyEvent::from(KeyCode::Enter)),
            NameEntryOutcome::Submitted("ada".to_string())
        );
    }

    #[test]
    fn empty_name_is_not_submitted() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, "   ");
        assert_eq!(
            entry.handle_key(KeyEvent::from(KeyCode::Enter)),
            NameEntryOutcome::Editing
        );
    }

    #[test]
    fn length_is_bounded() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(entry.text(), "abcdefghijklmnop");
    }

    #[test]
    fn backspace_and_cancel() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, "bob");
        entry.handle_key(KeyEvent::from(KeyCode::Backspace));
        assert_eq!(entry.text(), "bo");
        assert_eq!(
            entry.handle_key(KeyEvent::from(KeyCode::Esc)),
            NameEntryOutcome::Cancelled
        );
    }

    #[test]
    fn control_chords_are_ignored() {
        let mut entry = NameEntry::new();
        entry.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(entry.text(), "");
    }
}
