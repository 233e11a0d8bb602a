//! Application state for the TUI.

use std::mem;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
    Frame,
};
use tracing::{error, info, warn};

use super::{
    components::{
        Action, Component, GraphInput, GraphPanel, HelpMenu, KeyMouseEvent, Notification,
        ProblemForm, ProofTreePanel, Severity, StatusBar, Theme,
    },
    layout::{
        PanelSpec, Workspace, PANEL_CATALOG, PANEL_COUNTERMODEL, PANEL_EXECUTION_LOG,
        PANEL_MODALITY_GRAPH, PANEL_PROOF_TREE,
    },
    panels::{default_registry, Panel},
};
use crate::{
    engine::{
        BookChapter, CountermodelOptions, Problem, ProofResult, SolveRequest, SolvingEngine,
    },
    error::Result,
    logic::{LogicSelector, LogicUniverse, OperatorNotations},
    state::{
        codec::{
            self, KEY_MAX_COUNTERMODEL_NODES, KEY_MIN_COUNTERMODEL_NODES,
            KEY_OPERATOR_NOTATIONS, KEY_SHUFFLE_COUNTERMODELS,
        },
        Location, Preferences,
    },
    view_model::{graph, proof_tree},
};

/// Everything the application needs from the outside world.
pub struct AppContext {
    pub engine: Box<dyn SolvingEngine>,
    pub preferences: Preferences,
    pub location: Location,
    pub universe: LogicUniverse,
    pub catalog: Vec<BookChapter>,
}

/// Application state.
pub struct App {
    /// Whether app should exit.
    pub should_exit: bool,
    workspace: Workspace<Panel>,
    spec: PanelSpec,
    engine: Box<dyn SolvingEngine>,
    preferences: Preferences,
    location: Location,
    notations: OperatorNotations,
    selector: LogicSelector,
    catalog: Vec<BookChapter>,
    /// At most one problem waits for the engine.
    pending_submission: Option<Problem>,
    notification: Notification,
    help: HelpMenu,
    status_bar: StatusBar,
}

impl App {
    pub fn new(context: AppContext) -> Result<Self> {
        Self::with_layout(context, PanelSpec::default())
    }

    /// Build the workspace from `spec` and load the initial problem.
    ///
    /// A location carrying a complete problem is submitted on the first
    /// [`App::update`].
    pub fn with_layout(context: AppContext, spec: PanelSpec) -> Result<Self> {
        let workspace = Workspace::build(
            &spec,
            &default_registry(),
            context.preferences.active_panel_index(),
        )?;

        let mut app = Self {
            should_exit: false,
            workspace,
            spec,
            engine: context.engine,
            preferences: context.preferences,
            location: context.location,
            notations: OperatorNotations::default(),
            selector: LogicSelector::new(&context.universe),
            catalog: context.catalog,
            pending_submission: None,
            notification: Notification::default(),
            help: HelpMenu::default(),
            status_bar: StatusBar::default(),
        };
        app.populate();
        Ok(app)
    }

    fn populate(&mut self) {
        self.notations = OperatorNotations::resolve(
            self.location.get(KEY_OPERATOR_NOTATIONS),
            self.preferences.operator_notations().as_deref(),
        );

        let initial = codec::decode(&self.location);
        let seed = initial.clone().unwrap_or_else(|| {
            let logic = self
                .selector
                .compose(self.selector.default_choice())
                .unwrap_or_default();
            Problem::initial(logic)
        });

        let selector = self.selector.clone();
        let notations = self.notations;
        if let Some(form) = self.form_mut() {
            form.configure(selector, notations);
            form.seed(&seed, None);
        }

        let catalog = self.catalog.clone();
        if let Some(Panel::Catalog(panel)) = self.panel_mut(PANEL_CATALOG) {
            panel.update(catalog);
        }

        if let Some(problem) = initial {
            info!(logic = %problem.logic, "Location carries a problem, proving it");
            self.request_submission(problem);
        }
    }

    pub const fn location(&self) -> &Location {
        &self.location
    }

    pub const fn notations(&self) -> OperatorNotations {
        self.notations
    }

    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub const fn workspace(&self) -> &Workspace<Panel> {
        &self.workspace
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.message()
    }

    pub const fn has_pending_submission(&self) -> bool {
        self.pending_submission.is_some()
    }

    pub fn form(&self) -> Option<&ProblemForm> {
        self.workspace.panels().find_map(|panel| match panel {
            Panel::Problem(form) => Some(form),
            _ => None,
        })
    }

    fn form_mut(&mut self) -> Option<&mut ProblemForm> {
        self.workspace.panels_mut().find_map(|panel| match panel {
            Panel::Problem(form) => Some(form),
            _ => None,
        })
    }

    pub fn proof_tree(&self) -> Option<&ProofTreePanel> {
        self.workspace.panels().find_map(|panel| match panel {
            Panel::ProofTree(tree) => Some(tree),
            _ => None,
        })
    }

    pub fn graph(&self, name: &str) -> Option<&GraphPanel> {
        let index = self.workspace.index_of(name)?;
        match &self.workspace.handle(index)?.panel {
            Panel::Graph(graph) => Some(graph),
            _ => None,
        }
    }

    pub fn execution_log_rows(&self) -> Option<&[Vec<String>]> {
        let index = self.workspace.index_of(PANEL_EXECUTION_LOG)?;
        match &self.workspace.handle(index)?.panel {
            Panel::ExecutionLog(log) => Some(log.rows()),
            _ => None,
        }
    }

    fn panel_mut(&mut self, name: &str) -> Option<&mut Panel> {
        let index = self.workspace.index_of(name)?;
        self.workspace.panel_mut(index)
    }

    /// Queue `problem` for the engine. Ignored while another submission is
    /// still queued.
    pub fn request_submission(&mut self, problem: Problem) {
        if self.pending_submission.is_some() {
            warn!(logic = %problem.logic, "Submission already queued, ignoring");
            return;
        }
        self.pending_submission = Some(problem);
    }

    /// Run the queued submission, if any.
    pub fn update(&mut self) {
        if let Some(problem) = self.pending_submission.take() {
            self.prove(problem);
        }
    }

    fn prove(&mut self, problem: Problem) {
        let request = SolveRequest {
            countermodel: self.countermodel_options(),
            problem,
        };
        info!(
            id = %request.problem.id,
            logic = %request.problem.logic,
            conclusion = %request.problem.conclusion,
            "Submitting problem"
        );

        match self.engine.solve(&request) {
            Ok(result) => self.apply_result(&result),
            Err(e) => {
                error!(error = %e, "Engine failed");
                self.notification.show(Severity::Error, e.to_string());
            }
        }
    }

    fn apply_result(&mut self, result: &ProofResult) {
        let status = result.status();
        let logic = result.problem.logic.as_str();
        info!(status = status.label(), "Engine answered");

        if let Some(form) = self.form_mut() {
            form.seed(&result.problem, Some(status));
        }

        let tree = proof_tree::flatten(&result.root_node);
        if let Some(Panel::ProofTree(panel)) = self.panel_mut(PANEL_PROOF_TREE) {
            panel.update(tree);
        }

        let modality = GraphInput {
            model: graph::modality_graph_model(&result.modality_graph, logic),
            ..GraphInput::default()
        };
        if let Some(Panel::Graph(panel)) = self.panel_mut(PANEL_MODALITY_GRAPH) {
            panel.update(modality);
        }

        let countermodel = result
            .countermodel
            .as_ref()
            .map(|cm| GraphInput {
                model: graph::countermodel_model(cm, logic),
                comment: cm.comment.clone(),
                can_shuffle: graph::can_shuffle(Some(cm)),
            })
            .unwrap_or_default();
        if let Some(Panel::Graph(panel)) = self.panel_mut(PANEL_COUNTERMODEL) {
            panel.update(countermodel);
        }

        let log = result.execution_log.clone();
        if let Some(Panel::ExecutionLog(panel)) = self.panel_mut(PANEL_EXECUTION_LOG) {
            panel.update(log);
        }

        // Encoded from the solver's echo so the URL matches what was proved.
        self.location = codec::encode(&result.problem, self.notations, &self.location);
    }

    /// Countermodel controls from the location, falling back to the stored
    /// preferences for any the location does not carry.
    fn countermodel_options(&self) -> CountermodelOptions {
        let mut options = codec::countermodel_options(&self.location);
        let (min_nodes, max_nodes) = self.preferences.countermodel_bounds();
        options.min_nodes = options.min_nodes.or(min_nodes);
        options.max_nodes = options.max_nodes.or(max_nodes);
        if !self.location.has(KEY_SHUFFLE_COUNTERMODELS) {
            options.shuffle = self.preferences.should_shuffle_countermodels();
        }
        options
    }

    /// Ask for a countermodel of the next size, alternating 3 and 4 nodes.
    pub fn shuffle(&mut self) {
        let next = graph::next_shuffle_size(self.countermodel_options().min_nodes);
        info!(nodes = next, "Shuffling countermodel");

        self.location.set(KEY_MIN_COUNTERMODEL_NODES, next.to_string());
        self.location.set(KEY_MAX_COUNTERMODEL_NODES, next.to_string());
        self.location.set(KEY_SHUFFLE_COUNTERMODELS, "true");
        self.preferences.set_countermodel_bounds(next, next);
        self.preferences.set_should_shuffle_countermodels(true);

        if let Some(problem) = self.form().map(ProblemForm::extract_current_input) {
            self.request_submission(problem);
        }
    }

    /// Persist `notations` and start over from a clean location.
    pub fn change_notation(&mut self, notations: OperatorNotations) {
        info!(notations = %notations, "Changing operator notations");
        self.preferences.set_operator_notations(notations);
        self.location = Location::default();
        self.pending_submission = None;

        match Workspace::build(
            &self.spec,
            &default_registry(),
            self.preferences.active_panel_index(),
        ) {
            Ok(workspace) => self.workspace = workspace,
            Err(e) => {
                error!(error = %e, "Failed to rebuild workspace");
                self.notification.show(Severity::Error, e.to_string());
                return;
            }
        }
        self.populate();
    }

    fn show_url(&mut self, problem: &Problem) {
        let url = codec::encode(problem, self.notations, &self.location);
        self.notification
            .show(Severity::Info, format!("Shareable URL for {}:\n\n{url}", problem.id));
    }

    fn drain_actions(&mut self) {
        let actions: Vec<Action> = self
            .workspace
            .panels_mut()
            .flat_map(Panel::take_actions)
            .collect();

        for action in actions {
            match action {
                Action::Submit(problem) => self.request_submission(problem),
                Action::ShowUrl(problem) => self.show_url(&problem),
                Action::ChangeNotation(notations) => self.change_notation(notations),
                Action::ShuffleCountermodel => self.shuffle(),
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        if self.notification.handle_event(event.clone()) || self.help.handle_event(event.clone())
        {
            return;
        }

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => {}
        }
        self.drain_actions();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_exit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => return self.workspace.focus_next(),
            KeyCode::BackTab => return self.workspace.focus_previous(),
            _ => {}
        }

        let focus = self.workspace.focus();
        let captures_text = self
            .workspace
            .handle(focus)
            .is_some_and(|handle| handle.panel.captures_text());

        if !captures_text {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_exit = true;
                    return;
                }
                KeyCode::Char('?') => return self.help.toggle(),
                KeyCode::Char(digit @ '1'..='9') => return self.jump_to(digit),
                KeyCode::Char('[') => return self.cycle_tab(false),
                KeyCode::Char(']') => return self.cycle_tab(true),
                _ => {}
            }
        }

        if let Some(panel) = self.workspace.panel_mut(focus) {
            panel.handle_event(KeyMouseEvent::Key(key));
        }
    }

    /// Reveal and focus the n-th panel in workspace order.
    fn jump_to(&mut self, digit: char) {
        let Some(name) = digit
            .to_digit(10)
            .and_then(|n| self.workspace.names().nth(n as usize - 1))
            .map(str::to_string)
        else {
            return;
        };
        if let Some(tab) = self.workspace.reveal(&name) {
            self.preferences.set_active_panel_index(tab);
        }
        if let Some(index) = self.workspace.index_of(&name) {
            self.workspace.set_focus(index);
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        if let Some(index) = self.workspace.cycle_tab(forward) {
            self.preferences.set_active_panel_index(index);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);

        if mouse.kind == MouseEventKind::Moved {
            for index in self.workspace.visible_panels() {
                if let Some(panel) = self.workspace.panel_mut(index) {
                    panel.handle_event(KeyMouseEvent::Mouse(mouse));
                }
            }
            return;
        }

        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            if let Some(region) = self.workspace.tab_at(x, y) {
                if let Some(index) = self.workspace.select_tab(region.stack, region.tab) {
                    self.preferences.set_active_panel_index(index);
                }
                return;
            }
        }

        let Some(index) = self.workspace.panel_at(x, y) else {
            return;
        };
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            self.workspace.set_focus(index);
        }
        if let Some(panel) = self.workspace.panel_mut(index) {
            panel.handle_event(KeyMouseEvent::Mouse(mouse));
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [main_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        self.workspace.arrange(main_area);
        let focus = self.workspace.focus();

        for index in self.workspace.visible_panels() {
            let Some(panel_area) = self.workspace.area(index) else {
                continue;
            };
            let title = self
                .workspace
                .handle(index)
                .map(|handle| format!(" {} ", handle.title))
                .unwrap_or_default();
            let border = if index == focus {
                Theme::BORDER_FOCUSED
            } else {
                Theme::BORDER
            };
            let block = Block::bordered()
                .title(title)
                .border_style(Style::new().fg(border));
            let inner = block.inner(panel_area);
            frame.render_widget(block, panel_area);

            if let Some(panel) = self.workspace.panel_mut(index) {
                panel.set_has_focus(index == focus);
                panel.render(frame, inner);
            }
        }
        self.workspace.render_tabs(frame);

        self.status_bar.update(self.location.to_query_string());
        self.status_bar.render(frame, status_area);

        self.help.render(frame, area);
        self.notification.render(frame, area);
    }

    /// Take the final location, leaving an empty one behind.
    pub fn take_location(&mut self) -> Location {
        mem::take(&mut self.location)
    }
}
