//! Problem catalog: chapters of ready-made problems, consumed read-only.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::protocol::Problem;
use crate::error::Result;

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookChapter {
    pub name: String,
    pub problems: Vec<Problem>,
}

/// Load the catalog from `path`, or the built-in one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<BookChapter>> {
    let Some(path) = path else {
        return Ok(serde_json::from_str(BUILTIN_CATALOG)?);
    };

    let content = fs::read_to_string(path)?;
    let chapters: Vec<BookChapter> = serde_json::from_str(&content)?;
    info!(path = %path.display(), chapters = chapters.len(), "Loaded problem catalog");
    Ok(chapters)
}

/// Find a catalog problem by id.
pub fn find_problem<'a>(chapters: &'a [BookChapter], id: &str) -> Option<&'a Problem> {
    chapters
        .iter()
        .flat_map(|chapter| &chapter.problems)
        .find(|problem| problem.id == id)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let chapters = load_catalog(None).unwrap();
        assert!(!chapters.is_empty());
        assert!(chapters.iter().all(|c| !c.problems.is_empty()));

        let problem = find_problem(&chapters, "2.1").unwrap();
        assert_eq!(problem.premises, ["p ⊃ q", "p"]);
        assert_eq!(problem.expected, "proved");
    }

    #[test]
    fn test_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"Ch","problems":[{{"id":"x","expected":"","logic":"TModalLogic","premises":[],"conclusion":"p"}}]}}]"#
        )
        .unwrap();

        let chapters = load_catalog(Some(file.path())).unwrap();
        assert_eq!(chapters[0].problems[0].logic, "TModalLogic");
        assert!(find_problem(&chapters, "missing").is_none());
    }
}
