//! Editable text with a caret counted in characters.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::{Line, Span};

use super::Theme;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    caret: usize,
    multiline: bool,
}

impl TextInput {
    pub fn new(multiline: bool) -> Self {
        Self {
            multiline,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn caret(&self) -> usize {
        self.caret
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the content and put the caret at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\r', '\n'], " ")
        };
        self.caret = self.len();
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.len());
    }

    fn byte_index(&self, caret: usize) -> usize {
        self.text
            .char_indices()
            .nth(caret)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Splice `s` in at the caret and move the caret past it.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.caret);
        self.text.insert_str(at, s);
        self.caret += s.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        self.caret -= 1;
        let at = self.byte_index(self.caret);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.caret < self.len() {
            let at = self.byte_index(self.caret);
            self.text.remove(at);
        }
    }

    /// Move the caret to the same column of the line above or below, clamped
    /// to that line's length. False when there is no such line.
    pub fn move_line(&mut self, down: bool) -> bool {
        if !self.multiline {
            return false;
        }
        let lens: Vec<usize> = self.text.split('\n').map(|l| l.chars().count()).collect();
        let (mut start, mut row) = (0, 0);
        while row + 1 < lens.len() && self.caret > start + lens[row] {
            start += lens[row] + 1;
            row += 1;
        }
        let column = self.caret - start;

        let target = if down { row + 1 } else { row.wrapping_sub(1) };
        let Some(&len) = lens.get(target) else {
            return false;
        };
        let target_start: usize = lens[..target].iter().map(|l| l + 1).sum();
        self.caret = target_start + column.min(len);
        true
    }

    /// Editing keys. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
            }
            KeyCode::Enter if self.multiline => self.insert_char('\n'),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.caret = self.caret.saturating_sub(1),
            KeyCode::Right => self.set_caret(self.caret + 1),
            KeyCode::Home => self.caret = 0,
            KeyCode::End => self.caret = self.len(),
            _ => return false,
        }
        true
    }

    /// One line per text line; the caret cell is drawn reversed when shown.
    pub fn lines(&self, show_caret: bool) -> Vec<Line<'static>> {
        let mut offset = 0;
        self.text
            .split('\n')
            .map(|line| {
                let len = line.chars().count();
                let start = offset;
                offset += len + 1;
                if !show_caret || self.caret < start || self.caret > start + len {
                    return Line::raw(line.to_string());
                }

                let column = self.caret - start;
                let before: String = line.chars().take(column).collect();
                let at = line
                    .chars()
                    .nth(column)
                    .map_or_else(|| " ".to_string(), String::from);
                let after: String = line.chars().skip(column + 1).collect();
                Line::from(vec![
                    Span::raw(before),
                    Span::styled(at, Theme::CARET),
                    Span::raw(after),
                ])
            })
            .collect()
    }
}
