//! Component-based UI architecture.
//!
//! Each component encapsulates its own state, event handling, and rendering.
//! Click regions are computed during rendering to ensure consistency.
//! Components never call back into the app: requests such as "prove this"
//! are queued as [`Action`]s and drained by the app after the event.

mod about;
mod catalog;
mod execution_log;
mod graph_view;
mod help_menu;
mod notification;
pub mod problem_form;
mod proof_tree;
mod status_bar;
pub mod symbol_keyboard;
pub mod text_input;
mod theme;

pub use about::AboutPanel;
pub use catalog::CatalogPanel;
use crossterm::event::{KeyEvent, MouseEvent};
pub use execution_log::ExecutionLogPanel;
pub use graph_view::{GraphInput, GraphKind, GraphPanel};
pub use help_menu::HelpMenu;
pub use notification::{Notification, Severity};
pub use problem_form::{FormField, FormSeed, ProblemForm};
pub use proof_tree::ProofTreePanel;
use ratatui::{layout::Rect, Frame};
pub use status_bar::StatusBar;
pub use symbol_keyboard::{InputTarget, SymbolKeyboard};
pub use text_input::TextInput;
pub use theme::Theme;

use super::layout::contains;
use crate::{engine::Problem, logic::OperatorNotations};

#[derive(Clone, Copy)]
pub enum KeyMouseEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

/// Requests a component hands to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Prove a problem (form, catalog).
    Submit(Problem),
    /// Show a problem's shareable URL without proving it.
    ShowUrl(Problem),
    ChangeNotation(OperatorNotations),
    ShuffleCountermodel,
}

#[derive(Debug, Clone)]
pub struct ClickRegion<T> {
    pub area: Rect,
    pub target: T,
}

pub fn find_click_region<T>(regions: &[ClickRegion<T>], x: u16, y: u16) -> Option<&ClickRegion<T>> {
    regions.iter().find(|region| contains(region.area, x, y))
}

/// A UI component with co-located state, rendering, and event handling.
pub trait Component {
    type Input;
    type Event;

    /// Replace the component's data.
    fn update(&mut self, input: Self::Input);

    /// Handle a terminal event. Returns true if the event was consumed.
    fn handle_event(&mut self, _event: Self::Event) -> bool {
        false
    }

    /// Render the component and compute click regions.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
