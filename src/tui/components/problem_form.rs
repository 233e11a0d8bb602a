//! Problem input panel: notation, two-level logic choice, premises,
//! conclusion, symbol keyboard and the prove button.

use std::mem;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::warn;

use super::{
    find_click_region, Action, ClickRegion, Component, InputTarget, KeyMouseEvent,
    SymbolKeyboard, TextInput, Theme,
};
use crate::{
    engine::{Problem, ProofStatus},
    logic::{LogicChoice, LogicSelector, LogicUniverse, OperatorNotations},
    state::codec::split_premises,
};

const LABEL_WIDTH: u16 = 12;
const PREMISES_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    Notation,
    Category,
    Logic,
    Premises,
    #[default]
    Conclusion,
    Keyboard,
    Prove,
}

impl FormField {
    const ORDER: [Self; 7] = [
        Self::Notation,
        Self::Category,
        Self::Logic,
        Self::Premises,
        Self::Conclusion,
        Self::Keyboard,
        Self::Prove,
    ];

    fn step(self, forward: bool) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ORDER[next]
    }
}

/// Problem plus the status label to show next to it.
pub struct FormSeed {
    pub problem: Problem,
    pub status: Option<ProofStatus>,
}

pub struct ProblemForm {
    selector: LogicSelector,
    notations: OperatorNotations,
    choice: LogicChoice,
    premises: TextInput,
    conclusion: TextInput,
    keyboard: SymbolKeyboard,
    status: Option<ProofStatus>,
    field: FormField,
    has_focus: bool,
    click_regions: Vec<ClickRegion<FormField>>,
    actions: Vec<Action>,
}

impl Default for ProblemForm {
    fn default() -> Self {
        Self::new(LogicSelector::new(&LogicUniverse::default()))
    }
}

impl ProblemForm {
    pub fn new(selector: LogicSelector) -> Self {
        let mut form = Self {
            choice: selector.default_choice(),
            selector,
            notations: OperatorNotations::default(),
            premises: TextInput::new(true),
            conclusion: TextInput::new(false),
            keyboard: SymbolKeyboard::default(),
            status: None,
            field: FormField::default(),
            has_focus: false,
            click_regions: Vec::new(),
            actions: Vec::new(),
        };
        form.refresh_keyboard();
        form
    }

    /// Install the logic universe and notation chosen at startup.
    pub fn configure(&mut self, selector: LogicSelector, notations: OperatorNotations) {
        self.choice = selector.default_choice();
        self.selector = selector;
        self.notations = notations;
        self.refresh_keyboard();
    }

    /// Fill every input from `problem`. An unknown logic keeps the current
    /// logic selection.
    pub fn seed(&mut self, problem: &Problem, status: Option<ProofStatus>) {
        match self.selector.decompose(&problem.logic) {
            Ok(choice) => self.choice = choice,
            Err(e) => warn!(logic = %problem.logic, error = %e, "Keeping current logic selection"),
        }
        self.premises.set_text(&problem.premises.join("\n"));
        self.conclusion.set_text(&problem.conclusion);
        self.status = status;
    }

    /// The problem currently typed in, as user input. Blank premise lines are
    /// dropped; the conclusion is taken verbatim.
    pub fn extract_current_input(&self) -> Problem {
        Problem::user_input(
            self.logic(),
            split_premises(self.premises.text()),
            self.conclusion.text().to_string(),
        )
    }

    /// Composed identifier of the selected logic.
    pub fn logic(&self) -> String {
        // The choice only ever holds indices produced by the selector.
        self.selector.compose(self.choice).unwrap_or_default()
    }

    pub const fn notations(&self) -> OperatorNotations {
        self.notations
    }

    pub const fn status(&self) -> Option<ProofStatus> {
        self.status
    }

    pub const fn field(&self) -> FormField {
        self.field
    }

    pub const fn keyboard(&self) -> &SymbolKeyboard {
        &self.keyboard
    }

    pub fn premises_text(&self) -> &str {
        self.premises.text()
    }

    pub fn conclusion_text(&self) -> &str {
        self.conclusion.text()
    }

    pub const fn set_has_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    /// Whether plain character keys belong to a text input.
    pub const fn captures_text(&self) -> bool {
        matches!(self.field, FormField::Premises | FormField::Conclusion)
    }

    pub fn take_actions(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }

    pub fn focus_field(&mut self, field: FormField) {
        self.field = field;
        match field {
            FormField::Premises => self.keyboard.note_focus(InputTarget::Premises),
            FormField::Conclusion => self.keyboard.note_focus(InputTarget::Conclusion),
            _ => {}
        }
    }

    pub fn press_symbol(&mut self, index: usize) {
        if let Some(target) = self.keyboard.press(index, &mut self.premises, &mut self.conclusion) {
            self.focus_field(match target {
                InputTarget::Premises => FormField::Premises,
                InputTarget::Conclusion => FormField::Conclusion,
            });
        }
    }

    pub fn prove(&mut self) {
        self.actions.push(Action::Submit(self.extract_current_input()));
    }

    fn refresh_keyboard(&mut self) {
        self.keyboard.set_symbols(self.notations);
    }

    fn cycle_option(&mut self, forward: bool) {
        let step = |index: usize, len: usize| {
            if len == 0 {
                0
            } else if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            }
        };

        match self.field {
            FormField::Notation => {
                let all = OperatorNotations::ALL;
                let next = all[step(self.notations.index(), all.len())];
                if next != self.notations {
                    self.notations = next;
                    self.actions.push(Action::ChangeNotation(next));
                }
            }
            FormField::Category => {
                self.choice.category = step(self.choice.category, self.selector.categories().len());
            }
            FormField::Logic => {
                self.choice.logic = step(self.choice.logic, self.selector.logics().len());
            }
            FormField::Keyboard => self.keyboard.move_cursor(forward),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::F(5) => {
                self.prove();
                return true;
            }
            KeyCode::Up | KeyCode::Down => {
                let down = key.code == KeyCode::Down;
                if !(self.field == FormField::Premises && self.premises.move_line(down)) {
                    self.focus_field(self.field.step(down));
                }
                return true;
            }
            _ => {}
        }

        match self.field {
            FormField::Premises => self.premises.handle_key(key),
            FormField::Conclusion => self.conclusion.handle_key(key),
            FormField::Notation | FormField::Category | FormField::Logic | FormField::Keyboard => {
                match key.code {
                    KeyCode::Left | KeyCode::Char('h') => {
                        self.cycle_option(false);
                        true
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        self.cycle_option(true);
                        true
                    }
                    KeyCode::Enter | KeyCode::Char(' ') if self.field == FormField::Keyboard => {
                        self.press_symbol(self.keyboard.cursor());
                        true
                    }
                    _ => false,
                }
            }
            FormField::Prove => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.prove();
                    true
                }
                _ => false,
            },
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) -> bool {
        if let Some(index) = self.keyboard.symbol_at(x, y) {
            self.press_symbol(index);
            return true;
        }

        let Some(field) = find_click_region(&self.click_regions, x, y).map(|r| r.target) else {
            return false;
        };
        let already_focused = self.field == field;
        self.focus_field(field);
        match field {
            FormField::Prove => self.prove(),
            FormField::Notation | FormField::Category | FormField::Logic if already_focused => {
                self.cycle_option(true);
            }
            _ => {}
        }
        true
    }

    fn select_line(&self, field: FormField, value: &str) -> Line<'static> {
        let focused = self.has_focus && self.field == field;
        let style = if focused { Theme::FIELD_FOCUSED } else { Theme::NORMAL };
        Line::from(vec![
            Span::styled("‹ ", Theme::DIM),
            Span::styled(value.to_string(), style),
            Span::styled(" ›", Theme::DIM),
        ])
    }

    fn render_row(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        field: FormField,
        content: Vec<Line<'static>>,
    ) {
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)]).areas(area);
        frame.render_widget(Paragraph::new(Span::styled(label.to_string(), Theme::DIM)), label_area);

        let focused = self.has_focus && self.field == field;
        let mut paragraph = Paragraph::new(content);
        if focused && matches!(field, FormField::Premises | FormField::Conclusion) {
            paragraph = paragraph.style(Theme::FIELD_FOCUSED);
        }
        frame.render_widget(paragraph, value_area);
        self.click_regions.push(ClickRegion {
            area: value_area,
            target: field,
        });
    }
}

impl Component for ProblemForm {
    type Input = FormSeed;
    type Event = KeyMouseEvent;

    fn update(&mut self, input: Self::Input) {
        self.seed(&input.problem, input.status);
    }

    fn handle_event(&mut self, event: Self::Event) -> bool {
        match event {
            KeyMouseEvent::Key(key) => self.handle_key(key),
            KeyMouseEvent::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    self.handle_click(mouse.column, mouse.row)
                } else {
                    false
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.click_regions.clear();

        let [notation, category, logic, premises, conclusion, keyboard, _, prove] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(PREMISES_HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        let category_name = self
            .selector
            .categories()
            .get(self.choice.category)
            .cloned()
            .unwrap_or_default();
        let logic_name = self
            .selector
            .logics()
            .get(self.choice.logic)
            .cloned()
            .unwrap_or_default();
        let show_caret = |field| self.has_focus && self.field == field;

        let rows = [
            (
                notation,
                "Notations",
                FormField::Notation,
                vec![self.select_line(FormField::Notation, self.notations.name())],
            ),
            (
                category,
                "Logic",
                FormField::Category,
                vec![self.select_line(FormField::Category, &category_name)],
            ),
            (
                logic,
                "",
                FormField::Logic,
                vec![self.select_line(FormField::Logic, &logic_name)],
            ),
            (
                premises,
                "Premises",
                FormField::Premises,
                self.premises.lines(show_caret(FormField::Premises)),
            ),
            (
                conclusion,
                "Conclusion",
                FormField::Conclusion,
                self.conclusion.lines(show_caret(FormField::Conclusion)),
            ),
        ];
        for (row_area, label, field, content) in rows {
            self.render_row(frame, row_area, label, field, content);
        }

        let [_, keyboard_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)]).areas(keyboard);
        let keyboard_focused = self.has_focus && self.field == FormField::Keyboard;
        self.keyboard.render(frame, keyboard_area, keyboard_focused);

        let [button_area, status_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Fill(1)]).areas(prove);
        let button_style = if self.has_focus && self.field == FormField::Prove {
            Theme::FIELD_FOCUSED
        } else {
            Theme::BUTTON
        };
        frame.render_widget(Paragraph::new(Span::styled(" PROVE! ", button_style)), button_area);
        self.click_regions.push(ClickRegion {
            area: button_area,
            target: FormField::Prove,
        });

        if let Some(status) = self.status {
            frame.render_widget(
                Paragraph::new(Span::styled(status.label(), Theme::status(status))),
                status_area,
            );
        }
    }
}
