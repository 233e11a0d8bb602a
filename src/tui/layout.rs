//! Docked panel workspace: rows, columns and tab stacks of named panels.
//!
//! A [`PanelSpec`] names every panel slot. [`Workspace::build`] resolves each
//! name through a [`PanelRegistry`] factory and only returns once every panel
//! exists, so callers never observe a partially built workspace.

use std::collections::{HashMap, HashSet};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::components::Theme;
use crate::error::LayoutError;

pub const PANEL_PROBLEM: &str = "Problem";
pub const PANEL_ABOUT: &str = "About";
pub const PANEL_CATALOG: &str = "ProblemCatalog";
pub const PANEL_PROOF_TREE: &str = "ProofTree";
pub const PANEL_MODALITY_GRAPH: &str = "ModalityGraph";
pub const PANEL_COUNTERMODEL: &str = "Countermodel";
pub const PANEL_EXECUTION_LOG: &str = "ExecutionLog";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub weight: u16,
    pub spec: PanelSpec,
}

/// Declarative workspace tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelSpec {
    Row(Vec<Slot>),
    Column(Vec<Slot>),
    /// Tabs; only one panel visible at a time.
    Stack {
        panels: Vec<String>,
        /// Restore and report the visible tab across runs.
        persist_active: bool,
    },
    Panel(String),
}

impl PanelSpec {
    pub fn panel(name: &str) -> Self {
        Self::Panel(name.to_string())
    }

    pub fn stack(names: &[&str]) -> Self {
        Self::Stack {
            panels: names.iter().map(ToString::to_string).collect(),
            persist_active: false,
        }
    }

    pub fn persisted_stack(names: &[&str]) -> Self {
        Self::Stack {
            panels: names.iter().map(ToString::to_string).collect(),
            persist_active: true,
        }
    }

    pub fn row(slots: impl IntoIterator<Item = (u16, Self)>) -> Self {
        Self::Row(Self::slots(slots))
    }

    pub fn column(slots: impl IntoIterator<Item = (u16, Self)>) -> Self {
        Self::Column(Self::slots(slots))
    }

    fn slots(slots: impl IntoIterator<Item = (u16, Self)>) -> Vec<Slot> {
        slots
            .into_iter()
            .map(|(weight, spec)| Slot { weight, spec })
            .collect()
    }
}

impl Default for PanelSpec {
    /// Problem input and about on the left above the catalog, the proof tree
    /// in the middle, graphs and the execution log tabbed on the right.
    fn default() -> Self {
        Self::row([
            (
                35,
                Self::column([
                    (34, Self::stack(&[PANEL_PROBLEM, PANEL_ABOUT])),
                    (66, Self::panel(PANEL_CATALOG)),
                ]),
            ),
            (35, Self::panel(PANEL_PROOF_TREE)),
            (
                30,
                Self::persisted_stack(&[
                    PANEL_MODALITY_GRAPH,
                    PANEL_COUNTERMODEL,
                    PANEL_EXECUTION_LOG,
                ]),
            ),
        ])
    }
}

struct Registration<P> {
    title: String,
    factory: Box<dyn Fn() -> P>,
}

/// Panel factories by name.
pub struct PanelRegistry<P> {
    entries: HashMap<String, Registration<P>>,
}

impl<P> Default for PanelRegistry<P> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<P> PanelRegistry<P> {
    pub fn register(&mut self, name: &str, title: &str, factory: impl Fn() -> P + 'static) {
        self.entries.insert(
            name.to_string(),
            Registration {
                title: title.to_string(),
                factory: Box::new(factory),
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

pub struct PanelHandle<P> {
    pub name: String,
    pub title: String,
    pub panel: P,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabRegion {
    pub area: Rect,
    pub stack: usize,
    pub tab: usize,
}

enum Node {
    Split {
        direction: Direction,
        children: Vec<(u16, Node)>,
    },
    Stack(usize),
    Leaf(usize),
}

struct StackState {
    panels: Vec<usize>,
    active: usize,
    persist_active: bool,
}

pub struct Workspace<P> {
    root: Node,
    panels: Vec<PanelHandle<P>>,
    stacks: Vec<StackState>,
    areas: Vec<Option<Rect>>,
    tab_regions: Vec<TabRegion>,
    focus: usize,
}

struct Builder<'a, P> {
    registry: &'a PanelRegistry<P>,
    restored_tab: usize,
    seen: HashSet<String>,
    panels: Vec<PanelHandle<P>>,
    stacks: Vec<StackState>,
}

impl<P> Builder<'_, P> {
    fn instantiate(&mut self, name: &str) -> Result<usize, LayoutError> {
        let registration = self
            .registry
            .entries
            .get(name)
            .ok_or_else(|| LayoutError::UnregisteredPanel(name.to_string()))?;
        if !self.seen.insert(name.to_string()) {
            return Err(LayoutError::DuplicatePanel(name.to_string()));
        }

        self.panels.push(PanelHandle {
            name: name.to_string(),
            title: registration.title.clone(),
            panel: (registration.factory)(),
        });
        Ok(self.panels.len() - 1)
    }

    fn node(&mut self, spec: &PanelSpec) -> Result<Node, LayoutError> {
        match spec {
            PanelSpec::Row(slots) => self.split(Direction::Horizontal, slots),
            PanelSpec::Column(slots) => self.split(Direction::Vertical, slots),
            PanelSpec::Panel(name) => Ok(Node::Leaf(self.instantiate(name)?)),
            PanelSpec::Stack {
                panels,
                persist_active,
            } => {
                if panels.is_empty() {
                    return Err(LayoutError::EmptyStack);
                }
                let panels = panels
                    .iter()
                    .map(|name| self.instantiate(name))
                    .collect::<Result<Vec<_>, _>>()?;
                let active = if *persist_active {
                    self.restored_tab.min(panels.len() - 1)
                } else {
                    0
                };
                self.stacks.push(StackState {
                    panels,
                    active,
                    persist_active: *persist_active,
                });
                Ok(Node::Stack(self.stacks.len() - 1))
            }
        }
    }

    fn split(&mut self, direction: Direction, slots: &[Slot]) -> Result<Node, LayoutError> {
        let children = slots
            .iter()
            .map(|slot| Ok((slot.weight, self.node(&slot.spec)?)))
            .collect::<Result<Vec<_>, LayoutError>>()?;
        Ok(Node::Split {
            direction,
            children,
        })
    }
}

impl<P> Workspace<P> {
    /// Instantiate every panel of `spec`. Persisted stacks show tab
    /// `restored_tab`, clamped to their length.
    pub fn build(
        spec: &PanelSpec,
        registry: &PanelRegistry<P>,
        restored_tab: usize,
    ) -> Result<Self, LayoutError> {
        let mut builder = Builder {
            registry,
            restored_tab,
            seen: HashSet::new(),
            panels: Vec::new(),
            stacks: Vec::new(),
        };
        let root = builder.node(spec)?;

        let mut workspace = Self {
            root,
            areas: vec![None; builder.panels.len()],
            panels: builder.panels,
            stacks: builder.stacks,
            tab_regions: Vec::new(),
            focus: 0,
        };
        workspace.focus = workspace.visible_panels().first().copied().unwrap_or(0);
        Ok(workspace)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.panels.iter().map(|handle| handle.name.as_str())
    }

    pub fn handle(&self, index: usize) -> Option<&PanelHandle<P>> {
        self.panels.get(index)
    }

    pub fn panel_mut(&mut self, index: usize) -> Option<&mut P> {
        self.panels.get_mut(index).map(|handle| &mut handle.panel)
    }

    pub fn panels(&self) -> impl Iterator<Item = &P> {
        self.panels.iter().map(|handle| &handle.panel)
    }

    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.panels.iter_mut().map(|handle| &mut handle.panel)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.panels.iter().position(|handle| handle.name == name)
    }

    pub const fn focus(&self) -> usize {
        self.focus
    }

    pub fn active_tab(&self, stack: usize) -> Option<usize> {
        self.stacks.get(stack).map(|s| s.active)
    }

    /// Panels currently shown, in tree order.
    pub fn visible_panels(&self) -> Vec<usize> {
        let mut visible = Vec::new();
        self.collect_visible(&self.root, &mut visible);
        visible
    }

    fn collect_visible(&self, node: &Node, out: &mut Vec<usize>) {
        match node {
            Node::Split { children, .. } => {
                for (_, child) in children {
                    self.collect_visible(child, out);
                }
            }
            Node::Stack(stack) => {
                let stack = &self.stacks[*stack];
                out.push(stack.panels[stack.active]);
            }
            Node::Leaf(index) => out.push(*index),
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_panels().contains(&index)
    }

    /// Show tab `tab` of `stack`. Returns the new index when the stack
    /// persists its visible tab and the tab changed.
    pub fn select_tab(&mut self, stack: usize, tab: usize) -> Option<usize> {
        let state = self.stacks.get_mut(stack)?;
        if tab >= state.panels.len() || tab == state.active {
            return None;
        }

        let focus_was_hidden = state.panels[state.active] == self.focus;
        state.active = tab;
        if focus_was_hidden {
            self.focus = state.panels[tab];
        }
        state.persist_active.then_some(tab)
    }

    /// Reveal the panel named `name` if it sits in a stack.
    pub fn reveal(&mut self, name: &str) -> Option<usize> {
        let index = self.index_of(name)?;
        let (stack, tab) = self.stacks.iter().enumerate().find_map(|(s, state)| {
            state
                .panels
                .iter()
                .position(|&p| p == index)
                .map(|tab| (s, tab))
        })?;
        self.select_tab(stack, tab)
    }

    /// Cycle the tabs of the stack holding the focused panel.
    pub fn cycle_tab(&mut self, forward: bool) -> Option<usize> {
        let (stack, state) = self
            .stacks
            .iter()
            .enumerate()
            .find(|(_, s)| s.panels.contains(&self.focus))?;
        let len = state.panels.len();
        let tab = if forward {
            (state.active + 1) % len
        } else {
            (state.active + len - 1) % len
        };
        self.select_tab(stack, tab)
    }

    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let visible = self.visible_panels();
        if visible.is_empty() {
            return;
        }
        let len = visible.len();
        let current = visible.iter().position(|&i| i == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus = visible[next];
    }

    pub fn set_focus(&mut self, index: usize) {
        if self.is_visible(index) {
            self.focus = index;
        }
    }

    /// Compute panel rectangles and tab regions for `area`.
    pub fn arrange(&mut self, area: Rect) {
        self.areas.fill(None);
        self.tab_regions.clear();
        let mut pending = vec![(&self.root, area)];

        while let Some((node, area)) = pending.pop() {
            match node {
                Node::Split {
                    direction,
                    children,
                } => {
                    let constraints = children.iter().map(|(weight, _)| Constraint::Fill(*weight));
                    let rects = Layout::new(*direction, constraints).split(area);
                    pending.extend(children.iter().map(|(_, child)| child).zip(rects.iter().copied()));
                }
                Node::Leaf(index) => self.areas[*index] = Some(area),
                Node::Stack(stack) => {
                    let [tabs_area, content] =
                        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
                    let state = &self.stacks[*stack];
                    let mut x = tabs_area.x;
                    for (tab, &panel) in state.panels.iter().enumerate() {
                        let width = u16::try_from(self.panels[panel].title.chars().count() + 2)
                            .unwrap_or(u16::MAX)
                            .min(tabs_area.right().saturating_sub(x));
                        self.tab_regions.push(TabRegion {
                            area: Rect::new(x, tabs_area.y, width, 1),
                            stack: *stack,
                            tab,
                        });
                        x = x.saturating_add(width + 1);
                    }
                    self.areas[state.panels[state.active]] = Some(content);
                }
            }
        }
    }

    pub fn area(&self, index: usize) -> Option<Rect> {
        self.areas.get(index).copied().flatten()
    }

    pub fn tab_regions(&self) -> &[TabRegion] {
        &self.tab_regions
    }

    pub fn tab_at(&self, x: u16, y: u16) -> Option<TabRegion> {
        self.tab_regions
            .iter()
            .find(|region| contains(region.area, x, y))
            .copied()
    }

    pub fn panel_at(&self, x: u16, y: u16) -> Option<usize> {
        self.areas
            .iter()
            .position(|area| area.is_some_and(|area| contains(area, x, y)))
    }

    /// Draw the tab bars computed by the last [`Workspace::arrange`].
    pub fn render_tabs(&self, frame: &mut Frame) {
        for region in &self.tab_regions {
            let state = &self.stacks[region.stack];
            let panel = state.panels[region.tab];
            let style = if region.tab == state.active {
                Style::new()
                    .fg(Theme::TAB_ACTIVE)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Theme::DIM
            };
            let title = Line::from(Span::styled(format!(" {} ", self.panels[panel].title), style));
            frame.render_widget(Paragraph::new(title), region.area);
        }
    }
}

pub fn contains(area: Rect, x: u16, y: u16) -> bool {
    area.x <= x && x < area.x + area.width && area.y <= y && y < area.y + area.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PanelRegistry<String> {
        let mut registry = PanelRegistry::default();
        for name in [
            PANEL_PROBLEM,
            PANEL_ABOUT,
            PANEL_CATALOG,
            PANEL_PROOF_TREE,
            PANEL_MODALITY_GRAPH,
            PANEL_COUNTERMODEL,
            PANEL_EXECUTION_LOG,
        ] {
            registry.register(name, name, move || format!("{name} panel"));
        }
        registry
    }

    #[test]
    fn test_default_tree_instantiates_every_panel() {
        let workspace = Workspace::build(&PanelSpec::default(), &registry(), 0).unwrap();
        assert_eq!(workspace.len(), 7);
        assert_eq!(
            workspace.panels().filter(|p| p.ends_with(" panel")).count(),
            7
        );
        let visible: Vec<&str> = workspace
            .visible_panels()
            .into_iter()
            .filter_map(|i| workspace.handle(i).map(|h| h.name.as_str()))
            .collect();
        assert_eq!(
            visible,
            [PANEL_PROBLEM, PANEL_CATALOG, PANEL_PROOF_TREE, PANEL_MODALITY_GRAPH]
        );
    }

    #[test]
    fn test_unregistered_panel_is_fatal() {
        let spec = PanelSpec::row([
            (1, PanelSpec::panel(PANEL_PROOF_TREE)),
            (1, PanelSpec::panel("Nope")),
        ]);
        let result = Workspace::build(&spec, &registry(), 0);
        assert!(matches!(result, Err(LayoutError::UnregisteredPanel(name)) if name == "Nope"));
    }

    #[test]
    fn test_duplicate_and_empty_stack_are_fatal() {
        let duplicate = PanelSpec::stack(&[PANEL_ABOUT, PANEL_ABOUT]);
        assert!(matches!(
            Workspace::build(&duplicate, &registry(), 0),
            Err(LayoutError::DuplicatePanel(_))
        ));

        let empty = PanelSpec::stack(&[]);
        assert!(matches!(
            Workspace::build(&empty, &registry(), 0),
            Err(LayoutError::EmptyStack)
        ));
    }

    #[test]
    fn test_active_tab_is_restored_and_clamped() {
        let workspace = Workspace::build(&PanelSpec::default(), &registry(), 2).unwrap();
        let log = workspace.index_of(PANEL_EXECUTION_LOG).unwrap();
        assert!(workspace.is_visible(log));
        assert_eq!(workspace.active_tab(0), Some(0));

        let clamped = Workspace::build(&PanelSpec::default(), &registry(), 99).unwrap();
        assert_eq!(clamped.active_tab(1), Some(2));
    }

    #[test]
    fn test_only_persisted_stack_reports_changes() {
        let mut workspace = Workspace::build(&PanelSpec::default(), &registry(), 0).unwrap();
        assert_eq!(workspace.select_tab(0, 1), None);
        assert_eq!(workspace.select_tab(1, 1), Some(1));
        assert_eq!(workspace.select_tab(1, 1), None);
        assert_eq!(workspace.select_tab(1, 7), None);
        assert_eq!(workspace.reveal(PANEL_EXECUTION_LOG), Some(2));
    }

    #[test]
    fn test_arrange_and_hit_testing() {
        let mut workspace = Workspace::build(&PanelSpec::default(), &registry(), 0).unwrap();
        workspace.arrange(Rect::new(0, 0, 100, 40));

        let tree = workspace.index_of(PANEL_PROOF_TREE).unwrap();
        let area = workspace.area(tree).unwrap();
        assert_eq!(workspace.panel_at(area.x + 1, area.y + 1), Some(tree));
        assert!(workspace.area(workspace.index_of(PANEL_ABOUT).unwrap()).is_none());

        let tabs: Vec<TabRegion> = workspace
            .tab_regions()
            .iter()
            .filter(|r| r.stack == 1)
            .copied()
            .collect();
        assert_eq!(tabs.len(), 3);
        let second = tabs[1].area;
        assert_eq!(
            workspace.tab_at(second.x, second.y).map(|r| r.tab),
            Some(1)
        );
    }

    #[test]
    fn test_focus_cycles_visible_panels() {
        let mut workspace = Workspace::build(&PanelSpec::default(), &registry(), 0).unwrap();
        let problem = workspace.index_of(PANEL_PROBLEM).unwrap();
        assert_eq!(workspace.focus(), problem);

        for _ in 0..4 {
            workspace.focus_next();
        }
        assert_eq!(workspace.focus(), problem);
        workspace.focus_previous();
        assert_eq!(
            workspace.focus(),
            workspace.index_of(PANEL_MODALITY_GRAPH).unwrap()
        );

        workspace.cycle_tab(true);
        assert_eq!(
            workspace.focus(),
            workspace.index_of(PANEL_COUNTERMODEL).unwrap()
        );
    }
}
