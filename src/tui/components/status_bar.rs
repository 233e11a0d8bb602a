//! Status bar with keybindings and the shareable URL.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Component, Theme};

#[derive(Default)]
pub struct StatusBar {
    url: String,
}

impl Component for StatusBar {
    /// Current query string.
    type Input = String;
    type Event = ();

    fn update(&mut self, input: Self::Input) {
        self.url = input;
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        const KEYBINDINGS: &[(&str, &str)] = &[
            ("?", "help"),
            ("Tab", "panel"),
            ("F5", "prove"),
            ("q", "quit"),
        ];

        let separator = Span::raw(" │ ");
        let keybind_spans = KEYBINDINGS.iter().enumerate().flat_map(|(i, (key, desc))| {
            let prefix = (i > 0).then(|| separator.clone());
            prefix.into_iter().chain([
                Span::styled(*key, Theme::KEY),
                Span::raw(format!(": {desc}")),
            ])
        });

        let url_span = (!self.url.is_empty())
            .then(|| Span::styled(format!("  {}", self.url), Theme::DIM));

        let spans: Vec<Span> = keybind_spans.chain(url_span).collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
