//! HelpMenu component - overlay showing keyboard shortcuts.

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::{Component, Theme};

const KEYBINDINGS: &[(&str, &str)] = &[
    ("Tab", "next panel"),
    ("S-Tab", "previous panel"),
    ("[ / ]", "switch tab"),
    ("1-7", "jump to panel"),
    ("↑/↓", "form field or premise line"),
    ("←/→", "change option"),
    ("F5", "prove"),
    ("j/k", "navigate"),
    ("Enter", "select / pin"),
    ("Esc", "clear selection"),
    ("s", "shuffle countermodel"),
    ("u", "show catalog URL"),
    ("?", "close help"),
    ("q", "quit"),
];

/// Help menu popup showing keyboard shortcuts.
#[derive(Default)]
pub struct HelpMenu {
    visible: bool,
}

impl HelpMenu {
    pub const fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Component for HelpMenu {
    type Input = bool;
    type Event = Event;

    fn update(&mut self, input: Self::Input) {
        self.visible = input;
    }

    fn handle_event(&mut self, event: Self::Event) -> bool {
        if !self.visible {
            return false;
        }

        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.visible = false;
                true
            }
            _ => false,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = 34u16.min(area.width);
        #[allow(clippy::cast_possible_truncation)]
        let height = ((KEYBINDINGS.len() as u16) + 2).min(area.height);
        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2);
        let popup_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, popup_area);

        let block = Block::bordered()
            .title(" Help ")
            .border_style(Style::new().fg(Theme::BORDER_FOCUSED));

        let help_lines: Vec<Line> = KEYBINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("{key:>6}"), Theme::KEY),
                    Span::raw(format!("  {desc}")),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(help_lines).block(block), popup_area);
    }
}
