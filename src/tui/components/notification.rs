//! Blocking message overlay; any key or click dismisses it.

use crossterm::event::{Event, MouseEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use super::{Component, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Default)]
pub struct Notification {
    message: Option<(Severity, String)>,
}

impl Notification {
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) {
        self.message = Some((severity, message.into()));
    }

    pub const fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|(_, m)| m.as_str())
    }
}

impl Component for Notification {
    type Input = Option<(Severity, String)>;
    type Event = Event;

    fn update(&mut self, input: Self::Input) {
        self.message = input;
    }

    fn handle_event(&mut self, event: Self::Event) -> bool {
        if self.message.is_none() {
            return false;
        }
        match event {
            Event::Key(_) => {
                self.message = None;
                true
            }
            Event::Mouse(mouse) => {
                if matches!(mouse.kind, MouseEventKind::Down(_)) {
                    self.message = None;
                }
                true
            }
            _ => false,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some((severity, message)) = &self.message else {
            return;
        };

        let [popup] = Layout::horizontal([Constraint::Percentage(60)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(8)])
            .flex(Flex::Center)
            .areas(popup);

        let (title, color) = match severity {
            Severity::Info => (" Info ", Theme::BORDER_FOCUSED),
            Severity::Error => (" Error ", Color::Red),
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(message.as_str())
                .wrap(Wrap { trim: false })
                .block(
                    Block::bordered()
                        .title(title)
                        .title_bottom(" any key to dismiss ")
                        .border_style(Style::new().fg(color)),
                ),
            popup,
        );
    }
}
