//! On-screen operator keyboard.
//!
//! Remembers which text input was focused last (the conclusion until
//! anything else is focused) and splices symbols into it at its caret.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{text_input::TextInput, ClickRegion, Theme};
use crate::logic::OperatorNotations;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputTarget {
    Premises,
    #[default]
    Conclusion,
}

#[derive(Debug, Default)]
pub struct SymbolKeyboard {
    symbols: Vec<&'static str>,
    target: InputTarget,
    cursor: usize,
    click_regions: Vec<ClickRegion<usize>>,
}

impl SymbolKeyboard {
    /// Rebuild the keys for a notation.
    pub fn set_symbols(&mut self, notations: OperatorNotations) {
        self.symbols = notations.operator_symbols().to_vec();
        self.cursor = self.cursor.min(self.symbols.len().saturating_sub(1));
    }

    pub fn symbols(&self) -> &[&'static str] {
        &self.symbols
    }

    pub const fn target(&self) -> InputTarget {
        self.target
    }

    pub const fn note_focus(&mut self, target: InputTarget) {
        self.target = target;
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.symbols.len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    /// Insert symbol `index` into the last focused input. Returns the input
    /// that should get focus back.
    pub fn press(
        &self,
        index: usize,
        premises: &mut TextInput,
        conclusion: &mut TextInput,
    ) -> Option<InputTarget> {
        let symbol = self.symbols.get(index)?;
        let input = match self.target {
            InputTarget::Premises => premises,
            InputTarget::Conclusion => conclusion,
        };
        input.insert_str(symbol);
        Some(self.target)
    }

    pub fn symbol_at(&self, x: u16, y: u16) -> Option<usize> {
        super::find_click_region(&self.click_regions, x, y).map(|r| r.target)
    }

    /// Draw the keys on one row; the cursor key is highlighted when focused.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.click_regions.clear();
        let mut spans = Vec::with_capacity(self.symbols.len() * 2);
        let mut x = area.x;

        for (index, symbol) in self.symbols.iter().enumerate() {
            let label = format!("[{symbol}]");
            let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            if x + width > area.right() {
                break;
            }
            self.click_regions.push(ClickRegion {
                area: Rect::new(x, area.y, width, 1),
                target: index,
            });
            let style = if focused && index == self.cursor {
                Theme::FIELD_FOCUSED
            } else {
                Theme::KEY
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
