//! Proof tree panel: indented pre-order rows with hover and pinned
//! highlighting.

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{find_click_region, ClickRegion, Component, KeyMouseEvent, Theme};
use crate::{
    tui::layout::contains,
    view_model::{HighlightEngine, RenderModel, Selection},
};

#[derive(Default)]
pub struct ProofTreePanel {
    model: RenderModel,
    highlight: HighlightEngine,
    scroll: usize,
    area: Rect,
    click_regions: Vec<ClickRegion<usize>>,
}

impl ProofTreePanel {
    pub const fn model(&self) -> &RenderModel {
        &self.model
    }

    pub const fn highlight(&self) -> &HighlightEngine {
        &self.highlight
    }

    fn node_at(&self, x: u16, y: u16) -> Option<usize> {
        find_click_region(&self.click_regions, x, y).map(|r| r.target)
    }

    fn handle_pointer_move(&mut self, x: u16, y: u16) -> bool {
        match self.node_at(x, y) {
            Some(index) => {
                let Some(id) = self.model.nodes.get(index).map(|n| n.id.clone()) else {
                    return false;
                };
                if self.highlight.selection() != &Selection::HoverPreview(id.clone()) {
                    self.highlight.pointer_enter(&id);
                }
                true
            }
            None => {
                if matches!(self.highlight.selection(), Selection::HoverPreview(_)) {
                    self.highlight.pointer_leave();
                }
                false
            }
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) -> bool {
        if let Some(node) = self.node_at(x, y).and_then(|i| self.model.nodes.get(i)) {
            let id = node.id.clone();
            self.highlight.tap_node(&id);
            return true;
        }
        if contains(self.area, x, y) {
            self.highlight.tap_canvas();
            return true;
        }
        false
    }

    /// Move the preview (or the pin, when pinned) to a neighbouring row.
    fn step(&mut self, forward: bool) {
        let len = self.model.nodes.len();
        if len == 0 {
            return;
        }
        let next = match self.highlight.focused_index() {
            Some(i) if forward => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        let id = self.model.nodes[next].id.clone();
        if self.highlight.is_pinned() {
            self.highlight.tap_node(&id);
        } else {
            self.highlight.pointer_enter(&id);
        }
    }

    fn pin_focused(&mut self) {
        if let Some(node) = self
            .highlight
            .focused_index()
            .and_then(|i| self.model.nodes.get(i))
        {
            let id = node.id.clone();
            self.highlight.tap_node(&id);
        }
    }

    fn keep_focus_visible(&mut self, height: usize) {
        let Some(focused) = self.highlight.focused_index() else {
            return;
        };
        if focused < self.scroll {
            self.scroll = focused;
        } else if height > 0 && focused >= self.scroll + height {
            self.scroll = focused + 1 - height;
        }
    }
}

impl Component for ProofTreePanel {
    type Input = RenderModel;
    type Event = KeyMouseEvent;

    fn update(&mut self, input: Self::Input) {
        self.highlight = HighlightEngine::new(&input);
        self.model = input;
        self.scroll = 0;
        // Rows from the previous tree no longer map to nodes.
        self.click_regions.clear();
    }

    fn handle_event(&mut self, event: Self::Event) -> bool {
        match event {
            KeyMouseEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                match key.code {
                    KeyCode::Char('j') | KeyCode::Down => self.step(true),
                    KeyCode::Char('k') | KeyCode::Up => self.step(false),
                    KeyCode::Enter => self.pin_focused(),
                    KeyCode::Esc => self.highlight.tap_canvas(),
                    _ => return false,
                }
                true
            }
            KeyMouseEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved => self.handle_pointer_move(mouse.column, mouse.row),
                MouseEventKind::Down(MouseButton::Left) => {
                    self.handle_click(mouse.column, mouse.row)
                }
                MouseEventKind::ScrollDown => {
                    self.scroll = (self.scroll + 1).min(self.model.nodes.len().saturating_sub(1));
                    true
                }
                MouseEventKind::ScrollUp => {
                    self.scroll = self.scroll.saturating_sub(1);
                    true
                }
                _ => false,
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.area = area;
        self.click_regions.clear();

        if self.model.is_empty() {
            frame.render_widget(Paragraph::new("Nothing proved yet.").style(Theme::DIM), area);
            return;
        }

        let height = usize::from(area.height);
        self.keep_focus_visible(height);

        let mut lines = Vec::with_capacity(height);
        for (row, (index, node)) in self
            .model
            .nodes
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(height)
            .enumerate()
        {
            let indent = "│ ".repeat(node.depth().saturating_sub(1));
            let connector = if node.depth() == 0 { "" } else { "├─" };
            let prefix = format!("{indent}{connector}");
            let label = format!(" {}. {} ", node.id, node.label().replace('\n', " "));
            let prefix_width = u16::try_from(prefix.chars().count()).unwrap_or(u16::MAX);
            let label_width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);

            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + row as u16;
            let x = area.x.saturating_add(prefix_width);
            self.click_regions.push(ClickRegion {
                area: Rect::new(x, y, label_width.min(area.right().saturating_sub(x)), 1),
                target: index,
            });

            lines.push(Line::from(vec![
                Span::styled(prefix, Theme::TREE_CHARS),
                Span::styled(label, Theme::highlight(self.highlight.color_at(index))),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
