use std::{
    io::{ErrorKind, Write},
    process::{Command, Stdio},
};

use tracing::{debug, info};

use super::{
    protocol::{CountermodelOptions, ProofResult, SolveRequest},
    SolvingEngine,
};
use crate::error::EngineError;

/// Engine environment variable names, one per countermodel control.
pub const ENV_MIN_COUNTERMODEL_NODES: &str = "MIN_COUNTERMODEL_GRAPH_NODES";
pub const ENV_MAX_COUNTERMODEL_NODES: &str = "MAX_COUNTERMODEL_GRAPH_NODES";
pub const ENV_SHUFFLE_COUNTERMODELS: &str = "SHOULD_SHUFFLE_COUNTERMODEL_GRAPHS";

/// Runs an external command per solve: problem JSON on stdin, result JSON on
/// stdout. The call blocks until the process exits.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    command: String,
    args: Vec<String>,
}

impl ProcessEngine {
    pub const fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }

    fn apply_countermodel_env(command: &mut Command, options: CountermodelOptions) {
        if let Some(min) = options.min_nodes {
            command.env(ENV_MIN_COUNTERMODEL_NODES, min.to_string());
        }
        if let Some(max) = options.max_nodes {
            command.env(ENV_MAX_COUNTERMODEL_NODES, max.to_string());
        }
        if options.shuffle {
            command.env(ENV_SHUFFLE_COUNTERMODELS, "true");
        }
    }
}

impl SolvingEngine for ProcessEngine {
    fn solve(&self, request: &SolveRequest) -> Result<ProofResult, EngineError> {
        let payload = serde_json::to_string(&request.problem)
            .map_err(|e| EngineError::InvalidRequest(e.to_string()))?;

        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        Self::apply_countermodel_env(&mut command, request.countermodel);

        info!(command = %self.command, problem = %request.problem.id, "Starting engine");
        let mut child = command.spawn().map_err(|e| EngineError::SpawnFailed {
            command: self.command.clone(),
            reason: e.to_string(),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // An engine may exit before reading its input; its exit status tells why.
            if let Err(e) = stdin.write_all(payload.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(EngineError::SpawnFailed {
                        command: self.command.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let output = child.wait_with_output().map_err(|e| EngineError::SpawnFailed {
            command: self.command.clone(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(bytes = output.stdout.len(), "Engine finished");
        serde_json::from_slice(&output.stdout).map_err(|e| EngineError::InvalidOutput(e.to_string()))
    }
}
