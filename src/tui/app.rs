use crossterm::event::{KeyCode, KeyModifiers};

use super::message::{Speaker, Turn};

/// Number of lines to scroll with mouse wheel
const MOUSE_SCROLL_LINES: usize = 3;

/// Number of lines to scroll with PageUp/PageDown
const PAGE_SCROLL_LINES: usize = 10;

/// Prefix for the user's own lines in the transcript.
pub(super) const USER_PREFIX: &str = "> ";

/// Chat view state.
pub struct ChatApp {
    /// Transcript, oldest first.
    pub(super) turns: Vec<Turn>,
    /// Line being typed.
    pub(super) input: String,
    /// Current scroll position (line offset from bottom)
    pub(super) scroll_offset: usize,
    /// The session has ended; the next key closes the view.
    pub(super) finished: bool,
    /// Leave the event loop.
    pub(super) should_quit: bool,
}

impl ChatApp {
    pub fn new(greeting: &str) -> Self {
        let mut app = Self {
            turns: Vec::new(),
            input: String::new(),
            scroll_offset: 0,
            finished: false,
            should_quit: false,
        };
        app.push_reply(greeting);
        app
    }

    /// Record a reply and follow the transcript to the bottom.
    pub(super) fn push_reply(&mut self, text: &str) {
        self.turns.push(Turn {
            speaker: Speaker::Taskmate,
            text: text.to_string(),
        });
        self.scroll_offset = 0;
    }

    /// Mark the session as over after the farewell.
    pub(super) fn finish(&mut self) {
        self.finished = true;
    }

    /// Transcript flattened into display lines, with a blank line between turns.
    pub(super) fn lines(&self) -> Vec<(Speaker, String)> {
        let mut lines = Vec::new();
        for (i, turn) in self.turns.iter().enumerate() {
            if i > 0 {
                lines.push((turn.speaker, String::new()));
            }
            match turn.speaker {
                Speaker::User => lines.push((Speaker::User, format!("{}{}", USER_PREFIX, turn.text))),
                Speaker::Taskmate => {
                    for line in turn.text.lines() {
                        lines.push((Speaker::Taskmate, line.to_string()));
                    }
                }
            }
        }
        lines
    }

    /// Handle a key event. Returns a line when the user submits one.
    pub(super) fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        if self.finished {
            self.should_quit = true;
            return None;
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                if line.trim().is_empty() {
                    return None;
                }
                self.turns.push(Turn {
                    speaker: Speaker::User,
                    text: line.clone(),
                });
                self.scroll_offset = 0;
                return Some(line);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(PAGE_SCROLL_LINES),
            KeyCode::PageDown => self.scroll_down(PAGE_SCROLL_LINES),
            KeyCode::Home => {
                self.scroll_offset = self.max_scroll();
            }
            KeyCode::End => {
                self.scroll_offset = 0;
            }
            _ => {}
        }
        None
    }

    /// Handle mouse scroll event.
    pub(super) fn handle_mouse_scroll(&mut self, up: bool) {
        if up {
            self.scroll_up(MOUSE_SCROLL_LINES);
        } else {
            self.scroll_down(MOUSE_SCROLL_LINES);
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(1)
    }

    fn scroll_up(&mut self, by: usize) {
        self.scroll_offset = (self.scroll_offset + by).min(self.max_scroll());
    }

    fn scroll_down(&mut self, by: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_line(app: &mut ChatApp, text: &str) -> Option<String> {
        for c in text.chars() {
            assert_eq!(app.handle_key(KeyCode::Char(c), KeyModifiers::NONE), None);
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_starts_with_greeting() {
        let app = ChatApp::new("Hello!\nWhat can I do?");
        assert_eq!(
            app.lines(),
            vec![
                (Speaker::Taskmate, "Hello!".to_string()),
                (Speaker::Taskmate, "What can I do?".to_string()),
            ]
        );
    }

    #[test]
    fn test_enter_submits_and_records_line() {
        let mut app = ChatApp::new("hi");
        assert_eq!(type_line(&mut app, "todo read"), Some("todo read".to_string()));
        assert!(app.input.is_empty());
        assert_eq!(app.turns.last().map(|t| t.speaker), Some(Speaker::User));

        app.push_reply("Task successfully added:\n[T][ ] read\nTask counter: 1");
        let lines = app.lines();
        assert_eq!(lines[1], (Speaker::User, String::new()));
        assert_eq!(lines[2], (Speaker::User, "> todo read".to_string()));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_blank_input_is_not_submitted() {
        let mut app = ChatApp::new("hi");
        assert_eq!(type_line(&mut app, "   "), None);
        assert_eq!(app.turns.len(), 1);
    }

    #[test]
    fn test_backspace_edits_input() {
        let mut app = ChatApp::new("hi");
        app.handle_key(KeyCode::Char('l'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('x'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.input, "l");
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut app = ChatApp::new("hi");
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit);

        let mut app = ChatApp::new("hi");
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_any_key_closes_after_finish() {
        let mut app = ChatApp::new("hi");
        app.push_reply("Bye.");
        app.finish();
        assert_eq!(app.handle_key(KeyCode::Char('x'), KeyModifiers::NONE), None);
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = ChatApp::new("1\n2\n3\n4\n5");
        app.handle_key(KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(app.scroll_offset, 4);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.scroll_offset, 3);
        app.handle_mouse_scroll(false);
        assert_eq!(app.scroll_offset, 0);
        app.handle_key(KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(app.scroll_offset, 4);
        app.push_reply("new");
        assert_eq!(app.scroll_offset, 0);
    }
}
