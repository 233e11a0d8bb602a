//! Commands that run without the terminal workspace.

use std::fmt;

use tracing::info;

use crate::{
    engine::{
        catalog::find_problem, BookChapter, Problem, ProofResult, SolveRequest, SolvingEngine,
    },
    error::{Error, Result},
    logic::OperatorNotations,
    state::{codec, Location},
    view_model::{execution_log, proof_tree},
};

/// Prove the problem carried by `location` and describe the outcome.
pub fn solve(
    engine: &dyn SolvingEngine,
    location: &Location,
    notations: OperatorNotations,
) -> Result<String> {
    let problem =
        codec::decode(location).ok_or_else(|| Error::MissingProblem(location.to_query_string()))?;
    prove(engine, problem, location, notations)
}

/// Prove the catalog problem `id`. Countermodel controls still come from
/// `location`.
pub fn solve_catalog_problem(
    engine: &dyn SolvingEngine,
    chapters: &[BookChapter],
    id: &str,
    location: &Location,
    notations: OperatorNotations,
) -> Result<String> {
    let problem = find_problem(chapters, id)
        .cloned()
        .ok_or_else(|| Error::Config(format!("No catalog problem with id `{id}`")))?;
    prove(engine, problem, location, notations)
}

fn prove(
    engine: &dyn SolvingEngine,
    problem: Problem,
    location: &Location,
    notations: OperatorNotations,
) -> Result<String> {
    let request = SolveRequest {
        countermodel: codec::countermodel_options(location),
        problem,
    };
    info!(logic = %request.problem.logic, "Solving headless");

    let result = engine.solve(&request)?;
    let url = codec::encode(&result.problem, notations, location);
    Ok(Report {
        result: &result,
        url: &url,
    }
    .to_string())
}

struct Report<'a> {
    result: &'a ProofResult,
    url: &'a Location,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problem = &self.result.problem;
        writeln!(f, "{}", self.result.status().label())?;
        writeln!(f, "logic:      {}", problem.logic)?;
        for premise in &problem.premises {
            writeln!(f, "premise:    {premise}")?;
        }
        writeln!(f, "conclusion: {}", problem.conclusion)?;
        writeln!(
            f,
            "proof tree: {} nodes",
            proof_tree::flatten(&self.result.root_node).nodes.len()
        )?;
        if let Some(countermodel) = &self.result.countermodel {
            writeln!(f, "countermodel: {} worlds", countermodel.nodes.len())?;
        }
        for row in execution_log::rows(&self.result.execution_log) {
            writeln!(f, "  {}", row.join(" | "))?;
        }
        write!(f, "url: {}", self.url)
    }
}

struct CatalogListing<'a>(&'a [BookChapter]);

impl fmt::Display for CatalogListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chapter in self.0 {
            writeln!(f, "{}", chapter.name)?;
            for problem in &chapter.problems {
                writeln!(
                    f,
                    "  {:<8} {:<40} {} ⊢ {}",
                    problem.id,
                    problem.logic,
                    problem.premises.join(", "),
                    problem.conclusion
                )?;
            }
        }
        Ok(())
    }
}

/// One line per catalog problem, grouped by chapter.
pub fn catalog_listing(chapters: &[BookChapter]) -> String {
    CatalogListing(chapters).to_string()
}
