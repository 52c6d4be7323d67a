//! Single-field text editor
//!
//! Backs every editable field in the UI: the request parameter line, the
//! add/edit form fields and the save-path prompt. The cursor is a byte offset
//! that always sits on a UTF-8 character boundary.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor glyph drawn inside the active field
pub const CURSOR_GLYPH: char = '▊';

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextEditor {
    content: String,
    cursor: usize,
}

impl TextEditor {
    /// Create a new empty editor
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new editor with initial content, cursor at the end
    pub fn with_content(content: String) -> Self {
        let cursor = content.len();
        Self { content, cursor }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Replace all content and move the cursor to the end
    pub fn set_content(&mut self, content: String) {
        self.cursor = content.len();
        self.content = content;
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, s);
        self.cursor = cursor + s.len();
    }

    /// Insert a string, converting curly quotes to straight ones so pasted
    /// JSON stays parseable
    pub fn insert_str_normalized(&mut self, s: &str) {
        let normalized = s
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2018}', '\u{2019}'], "'");
        self.insert_str(&normalized);
    }

    /// Backspace. Returns false at the start of the content.
    pub fn delete_char_before_cursor(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        match self.content[..cursor].char_indices().next_back() {
            Some((start, _)) => {
                self.content.remove(start);
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    /// Delete key. Returns false at the end of the content.
    pub fn delete_char_after_cursor(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        if cursor >= self.content.len() {
            return false;
        }
        self.content.remove(cursor);
        true
    }

    /// Ctrl+W: remove trailing whitespace and the word before the cursor
    pub fn delete_word_before_cursor(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        if cursor == 0 {
            return false;
        }

        let before = self.content[..cursor].trim_end();
        let start = before
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        self.content.replace_range(start..cursor, "");
        self.cursor = start;
        true
    }

    pub fn move_cursor_left(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        match self.content[..cursor].char_indices().next_back() {
            Some((start, _)) => {
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_right(&mut self) -> bool {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        match self.content[cursor..].chars().next() {
            Some(c) => {
                self.cursor = cursor + c.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Content with the cursor glyph spliced in, for rendering the active field
    pub fn display_with_cursor(&self) -> String {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let mut display = String::with_capacity(self.content.len() + CURSOR_GLYPH.len_utf8());
        display.push_str(&self.content[..cursor]);
        display.push(CURSOR_GLYPH);
        display.push_str(&self.content[cursor..]);
        display
    }

    /// Handle a key event - returns true if the event was handled
    ///
    /// Plain characters are inserted one at a time here; the event layer calls
    /// `handle_paste_batch` instead when it wants paste batching.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.delete_word_before_cursor()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// Insert `initial_char` plus every character event already queued behind it.
    ///
    /// Terminals deliver a paste as a burst of key events; draining them in one
    /// go keeps the UI from redrawing per character. Returns the number of
    /// characters inserted and the key that ended the burst, which the caller
    /// still has to handle.
    pub fn handle_paste_batch(&mut self, initial_char: char) -> (usize, Option<KeyEvent>) {
        self.insert_batch(initial_char, || {
            match crossterm::event::poll(std::time::Duration::ZERO) {
                Ok(true) => crossterm::event::read().ok(),
                _ => None,
            }
        })
    }

    fn insert_batch(
        &mut self,
        initial_char: char,
        mut next_event: impl FnMut() -> Option<Event>,
    ) -> (usize, Option<KeyEvent>) {
        let mut batch = String::from(initial_char);
        let mut pending = None;

        while let Some(event) = next_event() {
            let Event::Key(key) = event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    batch.push(c);
                }
                _ => {
                    pending = Some(key);
                    break;
                }
            }
        }

        let count = batch.chars().count();
        self.insert_str_normalized(&batch);
        (count, pending)
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
