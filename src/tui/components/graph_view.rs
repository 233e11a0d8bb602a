//! Modality graph and countermodel panels, drawn as adjacency lists.

use std::mem;

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{Action, Component, KeyMouseEvent, Theme};
use crate::{tui::layout::contains, view_model::RenderModel};

const SHUFFLE_LABEL: &str = " SHUFFLE! ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    ModalityGraph,
    Countermodel,
}

#[derive(Debug, Clone, Default)]
pub struct GraphInput {
    pub model: RenderModel,
    pub comment: String,
    pub can_shuffle: bool,
}

pub struct GraphPanel {
    kind: GraphKind,
    input: GraphInput,
    scroll: u16,
    shuffle_area: Option<Rect>,
    actions: Vec<Action>,
}

impl GraphPanel {
    pub const fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            input: GraphInput {
                model: RenderModel {
                    nodes: Vec::new(),
                    edges: Vec::new(),
                },
                comment: String::new(),
                can_shuffle: false,
            },
            scroll: 0,
            shuffle_area: None,
            actions: Vec::new(),
        }
    }

    pub const fn kind(&self) -> GraphKind {
        self.kind
    }

    pub const fn model(&self) -> &RenderModel {
        &self.input.model
    }

    pub const fn can_shuffle(&self) -> bool {
        self.input.can_shuffle
    }

    pub fn take_actions(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }

    fn request_shuffle(&mut self) -> bool {
        if !self.input.can_shuffle {
            return false;
        }
        self.actions.push(Action::ShuffleCountermodel);
        true
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let model = &self.input.model;
        let mut lines: Vec<Line> = self
            .input
            .comment
            .lines()
            .map(|line| Line::styled(line.to_string(), Theme::DIM))
            .collect();
        if !lines.is_empty() {
            lines.push(Line::default());
        }

        for node in &model.nodes {
            let label = node.label();
            let mut label_lines = label.lines();
            let head = label_lines.next().unwrap_or_default().to_string();
            lines.push(Line::styled(head, Theme::NORMAL.add_modifier(Modifier::BOLD)));
            lines.extend(label_lines.map(|line| Line::raw(format!("  {line}"))));

            for edge in model.successors(&node.id) {
                let mut spans = vec![Span::styled("  └─", Theme::EDGE)];
                if !edge.label.is_empty() {
                    spans.push(Span::styled(edge.label.clone(), Theme::EDGE_LABEL));
                }
                spans.push(Span::styled("→ ", Theme::EDGE));
                spans.push(Span::raw(edge.target.to_string()));
                lines.push(Line::from(spans));
            }
        }
        lines
    }
}

impl Component for GraphPanel {
    type Input = GraphInput;
    type Event = KeyMouseEvent;

    fn update(&mut self, input: Self::Input) {
        self.input = input;
        self.scroll = 0;
    }

    fn handle_event(&mut self, event: Self::Event) -> bool {
        match event {
            KeyMouseEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                match key.code {
                    KeyCode::Char('s') => self.request_shuffle(),
                    KeyCode::Char('j') | KeyCode::Down => {
                        self.scroll = self.scroll.saturating_add(1);
                        true
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        self.scroll = self.scroll.saturating_sub(1);
                        true
                    }
                    _ => false,
                }
            }
            KeyMouseEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    let on_button = self
                        .shuffle_area
                        .is_some_and(|area| contains(area, mouse.column, mouse.row));
                    on_button && self.request_shuffle()
                }
                MouseEventKind::ScrollDown => {
                    self.scroll = self.scroll.saturating_add(1);
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
        self.shuffle_area = None;

        if self.input.model.is_empty() && self.input.comment.is_empty() {
            let message = match self.kind {
                GraphKind::ModalityGraph => "No modality graph.",
                GraphKind::Countermodel => "No countermodel.",
            };
            frame.render_widget(Paragraph::new(message).style(Theme::DIM), area);
            return;
        }

        frame.render_widget(
            Paragraph::new(self.lines())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            area,
        );

        if self.input.can_shuffle && area.height > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let width = (SHUFFLE_LABEL.len() as u16).min(area.width);
            let button = Rect::new(area.right() - width, area.bottom() - 1, width, 1);
            frame.render_widget(Paragraph::new(Span::styled(SHUFFLE_LABEL, Theme::BUTTON)), button);
            self.shuffle_area = Some(button);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;

    #[test]
    fn test_shuffle_only_when_available() {
        let mut panel = GraphPanel::new(GraphKind::Countermodel);
        let press = KeyMouseEvent::Key(KeyEvent::from(KeyCode::Char('s')));
        assert!(!panel.handle_event(press));
        assert!(panel.take_actions().is_empty());

        panel.update(GraphInput {
            can_shuffle: true,
            ..GraphInput::default()
        });
        assert!(panel.handle_event(press));
        assert_eq!(panel.take_actions(), [Action::ShuffleCountermodel]);
    }
}
