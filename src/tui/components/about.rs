use ratatui::{
    layout::Rect,
    style::Modifier,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{Component, Theme};

const ABOUT: &[&str] = &[
    "Semantic tableau prover for first order modal logic and other non-classical logics.",
    "",
    "Tableau rules follow Graham Priest, \"An Introduction to Non-Classical Logic. From If to Is\" (second edition).",
    "",
    "Compose a problem on the Problem tab or pick one from the catalog, then prove it.",
    "The shareable URL in the status bar reloads the same problem with --query.",
];

/// Static credits.
#[derive(Default)]
pub struct AboutPanel;

impl Component for AboutPanel {
    type Input = ();
    type Event = ();

    fn update(&mut self, _input: Self::Input) {}

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::styled(
                concat!("tableau-tui ", env!("CARGO_PKG_VERSION")),
                Theme::NORMAL.add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        lines.extend(ABOUT.iter().map(|line| Line::raw(*line)));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }
}
