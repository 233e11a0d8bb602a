//! Problem catalog panel: chapters and their problems.

use std::mem;

use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{find_click_region, Action, ClickRegion, Component, KeyMouseEvent, Theme};
use crate::engine::{BookChapter, Problem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Chapter(usize),
    Problem { chapter: usize, problem: usize },
}

#[derive(Default)]
pub struct CatalogPanel {
    chapters: Vec<BookChapter>,
    rows: Vec<Row>,
    selected: Option<usize>,
    scroll: usize,
    click_regions: Vec<ClickRegion<usize>>,
    actions: Vec<Action>,
}

impl CatalogPanel {
    pub fn take_actions(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }

    pub fn selected_problem(&self) -> Option<&Problem> {
        match self.rows.get(self.selected?)? {
            Row::Problem { chapter, problem } => self.chapters.get(*chapter)?.problems.get(*problem),
            Row::Chapter(_) => None,
        }
    }

    fn problem_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| matches!(row, Row::Problem { .. }).then_some(i))
    }

    fn step(&mut self, forward: bool) {
        let rows: Vec<usize> = self.problem_rows().collect();
        if rows.is_empty() {
            return;
        }
        let position = self.selected.and_then(|s| rows.iter().position(|&r| r == s));
        let next = match position {
            Some(p) if forward => (p + 1).min(rows.len() - 1),
            Some(p) => p.saturating_sub(1),
            None => 0,
        };
        self.selected = Some(rows[next]);
    }

    fn emit(&mut self, open_url: bool) -> bool {
        let Some(problem) = self.selected_problem().cloned() else {
            return false;
        };
        self.actions.push(if open_url {
            Action::ShowUrl(problem)
        } else {
            Action::Submit(problem)
        });
        true
    }
}

impl Component for CatalogPanel {
    type Input = Vec<BookChapter>;
    type Event = KeyMouseEvent;

    fn update(&mut self, input: Self::Input) {
        self.rows = input
            .iter()
            .enumerate()
            .flat_map(|(chapter, c)| {
                std::iter::once(Row::Chapter(chapter)).chain(
                    (0..c.problems.len()).map(move |problem| Row::Problem { chapter, problem }),
                )
            })
            .collect();
        self.chapters = input;
        self.selected = None;
        self.scroll = 0;
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
                    KeyCode::Enter => return self.emit(false),
                    KeyCode::Char('u') => return self.emit(true),
                    _ => return false,
                }
                true
            }
            KeyMouseEvent::Mouse(mouse) => {
                let open_url = match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => false,
                    MouseEventKind::Down(MouseButton::Middle | MouseButton::Right) => true,
                    _ => return false,
                };
                let Some(row) =
                    find_click_region(&self.click_regions, mouse.column, mouse.row).map(|r| r.target)
                else {
                    return false;
                };
                self.selected = Some(row);
                self.emit(open_url)
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.click_regions.clear();
        let height = usize::from(area.height);
        if let Some(selected) = self.selected {
            if selected < self.scroll {
                self.scroll = selected;
            } else if height > 0 && selected >= self.scroll + height {
                self.scroll = selected + 1 - height;
            }
        }

        let mut lines = Vec::with_capacity(height);
        let visible = self.rows.iter().enumerate().skip(self.scroll).take(height);
        for (offset, (index, row)) in visible.enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + offset as u16;
            let line = match *row {
                Row::Chapter(chapter) => Line::styled(
                    format!("{}. {}", chapter + 1, self.chapters[chapter].name),
                    Theme::NORMAL.add_modifier(Modifier::BOLD),
                ),
                Row::Problem { chapter, problem } => {
                    let problem = &self.chapters[chapter].problems[problem];
                    self.click_regions.push(ClickRegion {
                        area: Rect::new(area.x, y, area.width, 1),
                        target: index,
                    });
                    let style = if self.selected == Some(index) {
                        Theme::FIELD_FOCUSED
                    } else {
                        Theme::KEY.add_modifier(Modifier::UNDERLINED)
                    };
                    Line::from(vec![
                        Span::raw("   "),
                        Span::styled(problem.id.clone(), style),
                        Span::styled(format!("  {}", problem.logic), Theme::DIM),
                    ])
                }
            };
            lines.push(line);
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::engine::load_catalog;

    fn key(code: KeyCode) -> KeyMouseEvent {
        KeyMouseEvent::Key(KeyEvent::from(code))
    }

    #[test]
    fn test_navigation_skips_chapter_rows() {
        let mut panel = CatalogPanel::default();
        panel.update(load_catalog(None).unwrap());
        assert!(panel.selected_problem().is_none());

        panel.handle_event(key(KeyCode::Char('j')));
        assert_eq!(panel.selected_problem().map(|p| p.id.as_str()), Some("2.1"));

        assert!(panel.handle_event(key(KeyCode::Enter)));
        assert!(matches!(&panel.take_actions()[..], [Action::Submit(p)] if p.id == "2.1"));

        assert!(panel.handle_event(key(KeyCode::Char('u'))));
        assert!(matches!(&panel.take_actions()[..], [Action::ShowUrl(p)] if p.id == "2.1"));
    }

    #[test]
    fn test_enter_without_selection_does_nothing() {
        let mut panel = CatalogPanel::default();
        panel.update(load_catalog(None).unwrap());
        assert!(!panel.handle_event(key(KeyCode::Enter)));
        assert!(panel.take_actions().is_empty());
    }
}
