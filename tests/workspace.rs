mod common;

use common::{app, app_with, ScriptedEngine, K_PROBLEM};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::TestBackend, Terminal};
use tableau_tui::{
    engine::{NodeId, ProofStatus},
    state::{
        codec::{KEY_MAX_COUNTERMODEL_NODES, KEY_MIN_COUNTERMODEL_NODES, KEY_SHUFFLE_COUNTERMODELS},
        Preferences,
    },
    tui::{
        app::App,
        layout::{PANEL_CATALOG, PANEL_COUNTERMODEL, PANEL_MODALITY_GRAPH, PANEL_PROOF_TREE},
    },
    view_model::{HighlightColor, Selection},
};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn click(x: u16, y: u16) -> Event {
    mouse(MouseEventKind::Down(MouseButton::Left), x, y)
}

fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    })
}

fn focus(app: &mut App, name: &str) {
    let target = app.workspace().index_of(name).unwrap();
    for _ in 0..app.workspace().len() {
        if app.workspace().focus() == target {
            return;
        }
        app.handle_event(&key(KeyCode::Tab));
    }
    assert_eq!(app.workspace().focus(), target, "{name} is not reachable");
}

fn draw(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_result_fans_out_to_every_panel() {
    let engine = ScriptedEngine {
        execution_log: (1..=9).map(|i| format!("{i}ms")).collect(),
        ..ScriptedEngine::disproving()
    };
    let mut app = app(&engine, K_PROBLEM);
    app.update();

    assert_eq!(engine.request_count(), 1);
    assert_eq!(app.form().unwrap().status(), Some(ProofStatus::Disproved));
    assert_eq!(app.proof_tree().unwrap().model().nodes.len(), 2);
    assert_eq!(app.graph(PANEL_MODALITY_GRAPH).unwrap().model().nodes.len(), 2);

    let countermodel = app.graph(PANEL_COUNTERMODEL).unwrap();
    assert_eq!(countermodel.model().nodes.len(), 3);
    assert!(countermodel.can_shuffle());

    let rows = app.execution_log_rows().unwrap();
    let widths: Vec<usize> = rows.iter().map(Vec::len).collect();
    assert_eq!(widths, [4, 4, 1]);
}

#[test]
fn test_shuffle_alternates_between_three_and_four_nodes() {
    let engine = ScriptedEngine::disproving();
    let mut preferences = Preferences::in_memory();
    preferences.set_active_panel_index(1);
    let mut app = app_with(&engine, preferences, K_PROBLEM);
    app.update();

    focus(&mut app, PANEL_COUNTERMODEL);
    let mut sizes = Vec::new();
    for _ in 0..4 {
        app.handle_event(&key(KeyCode::Char('s')));
        app.update();

        let request = engine.last_request();
        assert!(request.countermodel.shuffle);
        assert_eq!(request.countermodel.min_nodes, request.countermodel.max_nodes);
        assert_eq!(request.problem.conclusion, "□p");
        sizes.push(request.countermodel.min_nodes.unwrap());
    }

    assert_eq!(sizes, [3, 4, 3, 4]);
    assert_eq!(app.location().get(KEY_MIN_COUNTERMODEL_NODES), Some("4"));
    assert_eq!(app.location().get(KEY_MAX_COUNTERMODEL_NODES), Some("4"));
    assert_eq!(app.location().get(KEY_SHUFFLE_COUNTERMODELS), Some("true"));
    assert_eq!(app.preferences().countermodel_bounds(), (Some(4), Some(4)));
    assert!(app.preferences().should_shuffle_countermodels());
}

#[test]
fn test_stored_countermodel_controls_apply_until_url_sets_them() {
    let engine = ScriptedEngine::disproving();
    let mut preferences = Preferences::in_memory();
    preferences.set_active_panel_index(1);
    preferences.set_countermodel_bounds(4, 4);
    preferences.set_should_shuffle_countermodels(true);
    let mut app = app_with(&engine, preferences, K_PROBLEM);
    app.update();

    let request = engine.last_request();
    assert_eq!(request.countermodel.min_nodes, Some(4));
    assert_eq!(request.countermodel.max_nodes, Some(4));
    assert!(request.countermodel.shuffle);

    // The stored minimum of 4 makes the next shuffle ask for 3.
    focus(&mut app, PANEL_COUNTERMODEL);
    app.handle_event(&key(KeyCode::Char('s')));
    app.update();
    assert_eq!(engine.last_request().countermodel.min_nodes, Some(3));

    let mut preferences = Preferences::in_memory();
    preferences.set_countermodel_bounds(4, 4);
    preferences.set_should_shuffle_countermodels(true);
    let query = format!(
        "{K_PROBLEM}&{KEY_MIN_COUNTERMODEL_NODES}=3&{KEY_SHUFFLE_COUNTERMODELS}=false"
    );
    let mut app = app_with(&engine, preferences, &query);
    app.update();

    let request = engine.last_request();
    assert_eq!(request.countermodel.min_nodes, Some(3));
    assert_eq!(request.countermodel.max_nodes, Some(4));
    assert!(!request.countermodel.shuffle);
}

#[test]
fn test_shuffle_needs_independent_countermodel() {
    let engine = ScriptedEngine {
        countermodel: Some(common::countermodel(true)),
        ..ScriptedEngine::default()
    };
    let mut preferences = Preferences::in_memory();
    preferences.set_active_panel_index(1);
    let mut app = app_with(&engine, preferences, K_PROBLEM);
    app.update();

    focus(&mut app, PANEL_COUNTERMODEL);
    app.handle_event(&key(KeyCode::Char('s')));
    app.update();

    assert_eq!(engine.request_count(), 1);
    assert!(!app.location().has(KEY_SHUFFLE_COUNTERMODELS));
}

#[test]
fn test_engine_failure_leaves_results_untouched() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, K_PROBLEM);
    app.update();
    let location = app.location().clone();

    *engine.fail.borrow_mut() = true;
    app.handle_event(&key(KeyCode::F(5)));
    app.update();

    assert_eq!(engine.request_count(), 2);
    assert_eq!(app.location(), &location);
    assert_eq!(app.form().unwrap().status(), Some(ProofStatus::Proved));
    assert_eq!(app.proof_tree().unwrap().model().nodes.len(), 2);
    assert!(app.notification().unwrap().contains("expected value"));

    // The overlay swallows the next key, even a quit.
    app.handle_event(&key(KeyCode::Char('q')));
    assert!(app.notification().is_none());
    assert!(!app.should_exit);
}

#[test]
fn test_catalog_problem_is_submitted() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, "");
    app.update();
    assert_eq!(engine.request_count(), 0);

    focus(&mut app, PANEL_CATALOG);
    app.handle_event(&key(KeyCode::Char('j')));
    app.handle_event(&key(KeyCode::Enter));
    app.update();

    let request = engine.last_request();
    assert_eq!(request.problem.id, "2.1");
    assert_eq!(app.form().unwrap().conclusion_text(), "q");
    assert_eq!(app.location().get("premises"), Some("p ⊃ q\np"));
}

#[test]
fn test_catalog_url_is_shown_not_submitted() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, "");

    focus(&mut app, PANEL_CATALOG);
    app.handle_event(&key(KeyCode::Char('j')));
    app.handle_event(&key(KeyCode::Char('u')));
    app.update();

    assert_eq!(engine.request_count(), 0);
    assert!(app.notification().unwrap().contains("logic=KModalLogic"));
}

#[test]
fn test_tab_click_persists_active_tab() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, "");
    draw(&mut app);

    let region = app
        .workspace()
        .tab_regions()
        .iter()
        .copied()
        .find(|region| region.tab == 2)
        .unwrap();
    app.handle_event(&click(region.area.x, region.area.y));

    assert_eq!(app.preferences().active_panel_index(), 2);
    assert_eq!(app.workspace().active_tab(region.stack), Some(2));
}

#[test]
fn test_bracket_keys_cycle_tabs_of_focused_stack() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, "");

    focus(&mut app, PANEL_MODALITY_GRAPH);
    app.handle_event(&key(KeyCode::Char(']')));
    assert_eq!(app.preferences().active_panel_index(), 1);
    app.handle_event(&key(KeyCode::Char('[')));
    assert_eq!(app.preferences().active_panel_index(), 0);
}

#[test]
fn test_render_shows_panels_and_status() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, K_PROBLEM);
    app.update();

    let screen = draw(&mut app);
    assert!(screen.contains("Proof tree"));
    assert!(screen.contains("Problem catalog"));
    assert!(app.workspace().index_of(PANEL_PROOF_TREE).is_some());
}

#[test]
fn test_quit_keys() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, "");
    focus(&mut app, PANEL_PROOF_TREE);
    app.handle_event(&key(KeyCode::Char('q')));
    assert!(app.should_exit);

    let mut app = common::app(&engine, "");
    app.handle_event(&Event::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )));
    assert!(app.should_exit);
}

#[test]
fn test_hover_previews_and_click_pins_proof_node() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, K_PROBLEM);
    app.update();
    draw(&mut app);

    let index = app.workspace().index_of(PANEL_PROOF_TREE).unwrap();
    let area = app.workspace().area(index).unwrap();
    let (root_x, root_y) = (area.x + 2, area.y + 1);
    let (child_x, child_y) = (area.x + 4, area.y + 2);
    let selection = |app: &App| app.proof_tree().unwrap().highlight().selection().clone();

    app.handle_event(&mouse(MouseEventKind::Moved, root_x, root_y));
    assert_eq!(selection(&app), Selection::HoverPreview(NodeId::Number(1)));

    app.handle_event(&click(child_x, child_y));
    assert_eq!(selection(&app), Selection::Pinned(NodeId::Number(2)));
    assert_eq!(app.workspace().focus(), index);

    app.handle_event(&mouse(MouseEventKind::Moved, root_x, root_y));
    assert_eq!(selection(&app), Selection::Pinned(NodeId::Number(2)));
    let tree = app.proof_tree().unwrap();
    assert_eq!(tree.highlight().color_of(&NodeId::Number(2)), HighlightColor::Selected);
    assert_eq!(tree.highlight().color_of(&NodeId::Number(1)), HighlightColor::Neutral);
}

#[test]
fn test_digit_jumps_to_hidden_panel() {
    let engine = ScriptedEngine::default();
    let mut app = app(&engine, "");
    focus(&mut app, PANEL_PROOF_TREE);

    // Problem, About, Catalog, Proof tree, Modality graph, Countermodel, Execution log
    app.handle_event(&key(KeyCode::Char('7')));

    let log = app.workspace().index_of("ExecutionLog").unwrap();
    assert_eq!(app.workspace().focus(), log);
    assert!(app.workspace().is_visible(log));
    assert_eq!(app.preferences().active_panel_index(), 2);
}
