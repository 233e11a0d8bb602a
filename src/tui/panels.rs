//! The concrete panels the workspace can host.

use ratatui::{layout::Rect, Frame};

use super::{
    components::{
        AboutPanel, Action, CatalogPanel, Component, ExecutionLogPanel, GraphKind, GraphPanel,
        KeyMouseEvent, ProblemForm, ProofTreePanel,
    },
    layout::{
        PanelRegistry, PANEL_ABOUT, PANEL_CATALOG, PANEL_COUNTERMODEL, PANEL_EXECUTION_LOG,
        PANEL_MODALITY_GRAPH, PANEL_PROBLEM, PANEL_PROOF_TREE,
    },
};

pub enum Panel {
    Problem(ProblemForm),
    About(AboutPanel),
    Catalog(CatalogPanel),
    ProofTree(ProofTreePanel),
    Graph(GraphPanel),
    ExecutionLog(ExecutionLogPanel),
}

impl Panel {
    pub fn handle_event(&mut self, event: KeyMouseEvent) -> bool {
        match self {
            Self::Problem(form) => form.handle_event(event),
            Self::About(_) => false,
            Self::Catalog(catalog) => catalog.handle_event(event),
            Self::ProofTree(tree) => tree.handle_event(event),
            Self::Graph(graph) => graph.handle_event(event),
            Self::ExecutionLog(log) => log.handle_event(event),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self {
            Self::Problem(form) => form.render(frame, area),
            Self::About(about) => about.render(frame, area),
            Self::Catalog(catalog) => catalog.render(frame, area),
            Self::ProofTree(tree) => tree.render(frame, area),
            Self::Graph(graph) => graph.render(frame, area),
            Self::ExecutionLog(log) => log.render(frame, area),
        }
    }

    pub fn take_actions(&mut self) -> Vec<Action> {
        match self {
            Self::Problem(form) => form.take_actions(),
            Self::Catalog(catalog) => catalog.take_actions(),
            Self::Graph(graph) => graph.take_actions(),
            _ => Vec::new(),
        }
    }

    /// Whether plain character keys go to the panel instead of global
    /// shortcuts.
    pub const fn captures_text(&self) -> bool {
        match self {
            Self::Problem(form) => form.captures_text(),
            _ => false,
        }
    }

    pub const fn set_has_focus(&mut self, has_focus: bool) {
        if let Self::Problem(form) = self {
            form.set_has_focus(has_focus);
        }
    }
}

/// Factories for every panel of the default workspace.
pub fn default_registry() -> PanelRegistry<Panel> {
    let mut registry = PanelRegistry::default();
    registry.register(PANEL_PROBLEM, "Problem", || {
        Panel::Problem(ProblemForm::default())
    });
    registry.register(PANEL_ABOUT, "About", || Panel::About(AboutPanel));
    registry.register(PANEL_CATALOG, "Problem catalog", || {
        Panel::Catalog(CatalogPanel::default())
    });
    registry.register(PANEL_PROOF_TREE, "Proof tree", || {
        Panel::ProofTree(ProofTreePanel::default())
    });
    registry.register(PANEL_MODALITY_GRAPH, "Modality graph", || {
        Panel::Graph(GraphPanel::new(GraphKind::ModalityGraph))
    });
    registry.register(PANEL_COUNTERMODEL, "Countermodel", || {
        Panel::Graph(GraphPanel::new(GraphKind::Countermodel))
    });
    registry.register(PANEL_EXECUTION_LOG, "Execution log", || {
        Panel::ExecutionLog(ExecutionLogPanel::default())
    });
    registry
}
