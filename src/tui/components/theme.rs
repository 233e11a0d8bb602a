//! Centralized theme and styling constants.

use ratatui::style::{Color, Modifier, Style};

use crate::{engine::ProofStatus, view_model::HighlightColor};

/// Theme constants for consistent styling across components.
pub struct Theme;

impl Theme {
    // Base text colors
    pub const DIM: Style = Style::new().fg(Color::DarkGray);
    pub const NORMAL: Style = Style::new().fg(Color::White);
    pub const KEY: Style = Style::new().fg(Color::Cyan);
    pub const ERROR: Style = Style::new().fg(Color::Red);

    // UI chrome colors
    pub const BORDER: Color = Color::DarkGray;
    pub const BORDER_FOCUSED: Color = Color::Cyan;
    pub const TAB_ACTIVE: Color = Color::Cyan;

    // Form widgets
    pub const FIELD_FOCUSED: Style = Style::new().bg(Color::Rgb(40, 40, 60)).fg(Color::White);
    pub const CARET: Style = Style::new().add_modifier(Modifier::REVERSED);
    pub const BUTTON: Style = Style::new()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    // Graph rendering
    pub const EDGE: Style = Style::new().fg(Color::DarkGray);
    pub const EDGE_LABEL: Style = Style::new().fg(Color::Magenta);
    pub const TREE_CHARS: Style = Style::new().fg(Color::DarkGray);

    /// Node style for a selection highlight.
    #[must_use]
    pub const fn highlight(color: HighlightColor) -> Style {
        match color {
            HighlightColor::Neutral => Self::NORMAL,
            HighlightColor::Selected => Style::new()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            HighlightColor::Contradicted => Style::new().fg(Color::Black).bg(Color::Gray),
            HighlightColor::Origin => Style::new().fg(Color::White).bg(Color::Red),
            HighlightColor::Sibling => Style::new().fg(Color::White).bg(Color::Blue),
        }
    }

    #[must_use]
    pub const fn status(status: ProofStatus) -> Style {
        let color = match status {
            ProofStatus::Proved => Color::Green,
            ProofStatus::Disproved => Color::Red,
            ProofStatus::Timeout => Color::Yellow,
        };
        Style::new().fg(color).add_modifier(Modifier::BOLD.union(Modifier::ITALIC))
    }

    /// Get alternating row background color.
    #[must_use]
    pub const fn row_bg(index: usize) -> Color {
        match index % 2 {
            0 => Color::Rgb(20, 20, 20),
            _ => Color::Rgb(25, 25, 25),
        }
    }
}
