#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use tableau_tui::{
    engine::{
        protocol::{Atomics, CountermodelNode},
        Countermodel, Graph, ProofResult, ProofTreeNode, SolveRequest, SolvingEngine,
    },
    error::EngineError,
    logic::LogicUniverse,
    state::{Location, Preferences},
    tui::app::{App, AppContext},
};

/// Engine that records every request and answers from a script.
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    pub requests: Rc<RefCell<Vec<SolveRequest>>>,
    pub fail: Rc<RefCell<bool>>,
    pub countermodel: Option<Countermodel>,
    pub execution_log: Vec<String>,
}

impl ScriptedEngine {
    pub fn disproving() -> Self {
        Self {
            countermodel: Some(countermodel(false)),
            ..Self::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> SolveRequest {
        self.requests.borrow().last().cloned().unwrap()
    }
}

impl SolvingEngine for ScriptedEngine {
    fn solve(&self, request: &SolveRequest) -> Result<ProofResult, EngineError> {
        self.requests.borrow_mut().push(request.clone());
        if *self.fail.borrow() {
            return Err(EngineError::InvalidOutput("expected value at line 1".into()));
        }

        let mut root = ProofTreeNode::leaf(1, "p");
        root.left = Some(Box::new(ProofTreeNode::leaf(2, "¬□p")));
        Ok(ProofResult {
            root_node: root,
            was_proved: self.countermodel.is_none(),
            has_timeout: false,
            problem: request.problem.clone(),
            modality_graph: Graph {
                nodes: vec!["w0".into(), "w1".into()],
                vertices: Vec::new(),
            },
            countermodel: self.countermodel.clone(),
            execution_log: self.execution_log.clone(),
        })
    }
}

pub fn countermodel(from_modality_graph: bool) -> Countermodel {
    let world = |possible_world| CountermodelNode {
        possible_world,
        is_normal_world: true,
        atomics: Atomics(vec![("p".into(), Some(false))]),
    };
    Countermodel {
        was_built_from_modality_graph: from_modality_graph,
        comment: "Countermodel with 3 worlds".into(),
        nodes: vec![world(0), world(1), world(2)],
        vertices: Vec::new(),
    }
}

pub fn app_with(engine: &ScriptedEngine, preferences: Preferences, query: &str) -> App {
    App::new(AppContext {
        engine: Box::new(engine.clone()),
        preferences,
        location: Location::parse(query),
        universe: LogicUniverse::default(),
        catalog: tableau_tui::engine::load_catalog(None).unwrap(),
    })
    .unwrap()
}

pub fn app(engine: &ScriptedEngine, query: &str) -> App {
    app_with(engine, Preferences::in_memory(), query)
}

pub const K_PROBLEM: &str = "?logic=KModalLogic&premises=p&conclusion=%E2%96%A1p";
