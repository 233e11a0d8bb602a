//! Boundary to the external solving engine.
//!
//! This module provides:
//! - `protocol`: Serde types for the problem/result JSON
//! - `process`: Engine backed by a child process
//! - `catalog`: Read-only problem catalog

pub mod catalog;
mod process;
pub mod protocol;

pub use catalog::{load_catalog, BookChapter};
pub use process::{
    ProcessEngine, ENV_MAX_COUNTERMODEL_NODES, ENV_MIN_COUNTERMODEL_NODES,
    ENV_SHUFFLE_COUNTERMODELS,
};
pub use protocol::{
    Countermodel, CountermodelOptions, Graph, NodeId, Problem, ProofResult, ProofStatus,
    ProofTreeNode, SolveRequest,
};

use crate::error::EngineError;

/// A solver that turns a problem into a proof or disproof.
///
/// Calls are synchronous and cannot be cancelled once started.
pub trait SolvingEngine {
    fn solve(&self, request: &SolveRequest) -> Result<ProofResult, EngineError>;
}

/// Stand-in used when no engine command is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredEngine;

impl SolvingEngine for UnconfiguredEngine {
    fn solve(&self, _request: &SolveRequest) -> Result<ProofResult, EngineError> {
        Err(EngineError::NotConfigured)
    }
}
