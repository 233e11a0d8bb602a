//! Execution log table.

use crossterm::event::{KeyCode, KeyEventKind, MouseEventKind};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Row, Table},
    Frame,
};

use super::{Component, KeyMouseEvent, Theme};
use crate::view_model::execution_log::{rows, COLUMNS, HEADER};

#[derive(Default)]
pub struct ExecutionLogPanel {
    rows: Vec<Vec<String>>,
    scroll: usize,
}

impl ExecutionLogPanel {
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl Component for ExecutionLogPanel {
    /// Raw log lines, one cell each.
    type Input = Vec<String>;
    type Event = KeyMouseEvent;

    fn update(&mut self, input: Self::Input) {
        self.rows = rows(&input);
        self.scroll = 0;
    }

    fn handle_event(&mut self, event: Self::Event) -> bool {
        let down = match event {
            KeyMouseEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('j') | KeyCode::Down => true,
                KeyCode::Char('k') | KeyCode::Up => false,
                _ => return false,
            },
            KeyMouseEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => true,
                MouseEventKind::ScrollUp => false,
                _ => return false,
            },
            KeyMouseEvent::Key(_) => return false,
        };
        self.scroll = if down {
            (self.scroll + 1).min(self.rows.len().saturating_sub(1))
        } else {
            self.scroll.saturating_sub(1)
        };
        true
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.rows.is_empty() {
            frame.render_widget(Paragraph::new("No execution log.").style(Theme::DIM), area);
            return;
        }

        let header = Row::new(HEADER).style(Theme::KEY.add_modifier(Modifier::BOLD));
        let body = self.rows.iter().enumerate().skip(self.scroll).map(|(i, cells)| {
            let height = cells.iter().map(|c| c.lines().count()).max().unwrap_or(1).max(1);
            Row::new(cells.iter().cloned())
                .height(u16::try_from(height).unwrap_or(u16::MAX))
                .style(Style::new().bg(Theme::row_bg(i)))
        });

        #[allow(clippy::cast_possible_truncation)]
        let widths = [Constraint::Ratio(1, COLUMNS as u32); COLUMNS];
        frame.render_widget(Table::new(body, widths).header(header).column_spacing(2), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_chunks_lines() {
        let mut panel = ExecutionLogPanel::default();
        panel.update((0..9).map(|i| i.to_string()).collect());
        let widths: Vec<usize> = panel.rows().iter().map(Vec::len).collect();
        assert_eq!(widths, [4, 4, 1]);
    }
}
