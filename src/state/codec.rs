//! Problem ⇄ query string mapping behind the shareable URL.
//!
//! The query string behaves like a browser's `URLSearchParams`: parameters
//! keep their order, `set` replaces in place or appends, and anything that
//! cannot be decoded is dropped instead of failing.

use std::fmt;

use tracing::debug;

use crate::{
    engine::{CountermodelOptions, Problem},
    logic::OperatorNotations,
};

pub const KEY_OPERATOR_NOTATIONS: &str = "operator_notations";
pub const KEY_LOGIC: &str = "logic";
pub const KEY_PREMISES: &str = "premises";
pub const KEY_CONCLUSION: &str = "conclusion";
pub const KEY_MIN_COUNTERMODEL_NODES: &str = "min_countermodel_graph_nodes";
pub const KEY_MAX_COUNTERMODEL_NODES: &str = "max_countermodel_graph_nodes";
pub const KEY_SHUFFLE_COUNTERMODELS: &str = "should_shuffle_countermodel_graphs";

/// Ordered query parameters of the shareable URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    params: Vec<(String, String)>,
}

impl Location {
    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                match (decode_component(key), decode_component(value)) {
                    (Some(key), Some(value)) => Some((key, value)),
                    _ => {
                        debug!(pair, "Skipping undecodable query parameter");
                        None
                    }
                }
            })
            .collect();
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Replace the first occurrence of `key` (dropping later duplicates), or
    /// append it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.params[index].1 = value;
                let mut seen = 0;
                self.params.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.params.push((key.to_string(), value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `?k=v&...`, or an empty string when there are no parameters.
    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

/// Split raw premise text into premises, dropping blank lines.
pub fn split_premises(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Write the problem and notation into a copy of `base`, keeping every other
/// parameter as it was.
pub fn encode(problem: &Problem, notations: OperatorNotations, base: &Location) -> Location {
    let mut location = base.clone();
    location.set(KEY_OPERATOR_NOTATIONS, notations.name());
    location.set(KEY_LOGIC, problem.logic.clone());
    location.set(KEY_PREMISES, problem.premises.join("\n"));
    location.set(KEY_CONCLUSION, problem.conclusion.clone());
    location
}

/// Whether the location carries a complete problem.
pub fn has_problem(location: &Location) -> bool {
    location.has(KEY_LOGIC) && location.has(KEY_PREMISES) && location.has(KEY_CONCLUSION)
}

/// The problem carried by the location, as user input. `None` unless logic,
/// premises and conclusion are all present.
pub fn decode(location: &Location) -> Option<Problem> {
    let logic = location.get(KEY_LOGIC)?;
    let premises = location.get(KEY_PREMISES)?;
    let conclusion = location.get(KEY_CONCLUSION)?;

    Some(Problem::user_input(
        logic.to_string(),
        split_premises(premises),
        conclusion.to_string(),
    ))
}

pub fn countermodel_options(location: &Location) -> CountermodelOptions {
    let parse = |key| location.get(key).and_then(|v| v.trim().parse().ok());
    CountermodelOptions {
        min_nodes: parse(KEY_MIN_COUNTERMODEL_NODES),
        max_nodes: parse(KEY_MAX_COUNTERMODEL_NODES),
        shuffle: location.get(KEY_SHUFFLE_COUNTERMODELS) == Some("true"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Problem {
        Problem::user_input(
            "KModalLogic".into(),
            vec!["p -> q".into(), "p".into()],
            "q".into(),
        )
    }

    #[test]
    fn test_encode_is_deterministic() {
        let first = encode(&sample(), OperatorNotations::BookNotations, &Location::default());
        let second = encode(&sample(), OperatorNotations::BookNotations, &Location::default());
        assert_eq!(first.to_query_string(), second.to_query_string());
        assert_eq!(
            first.to_query_string(),
            "?operator_notations=BookNotations&logic=KModalLogic&premises=p%20-%3E%20q%0Ap&conclusion=q"
        );
    }

    #[test]
    fn test_round_trip_through_query_string() {
        let problem = Problem::user_input(
            "FirstOrderLogic+ConstantDomain+NecessaryIdentity+KModalLogic".into(),
            vec!["∀x(P(x) ⊃ Q(x))".into(), "P(a) & b=c?".into()],
            " □Q(a) ".into(),
        );
        let query = encode(&problem, OperatorNotations::BookNotations, &Location::default())
            .to_query_string();

        assert_eq!(decode(&Location::parse(&query)), Some(problem));
    }

    #[test]
    fn test_empty_premises_round_trip() {
        let problem = Problem::user_input("TModalLogic".into(), vec![], "□p ⊃ p".into());
        let location = encode(&problem, OperatorNotations::default(), &Location::default());
        assert_eq!(decode(&location), Some(problem));
    }

    #[test]
    fn test_decode_requires_all_problem_fields() {
        let location = Location::parse("?logic=KModalLogic&conclusion=q");
        assert!(!has_problem(&location));
        assert_eq!(decode(&location), None);
    }

    #[test]
    fn test_encode_keeps_countermodel_parameters() {
        let base = Location::parse("?min_countermodel_graph_nodes=4&logic=old");
        let location = encode(&sample(), OperatorNotations::CommonMathNotations, &base);

        assert_eq!(location.get(KEY_LOGIC), Some("KModalLogic"));
        assert_eq!(location.get(KEY_MIN_COUNTERMODEL_NODES), Some("4"));
        assert!(location.to_query_string().starts_with("?min_countermodel_graph_nodes=4&logic="));
    }

    #[test]
    fn test_malformed_pairs_are_skipped() {
        let location = Location::parse("?logic=%E0%A4%A&premises=&&conclusion=p+q&flag");
        assert_eq!(location.get(KEY_LOGIC), None);
        assert_eq!(location.get(KEY_PREMISES), Some(""));
        assert_eq!(location.get(KEY_CONCLUSION), Some("p q"));
        assert_eq!(location.get("flag"), Some(""));
    }

    #[test]
    fn test_set_replaces_in_place_and_drops_duplicates() {
        let mut location = Location::parse("a=1&b=2&a=3");
        location.set("a", "9");
        assert_eq!(location.to_query_string(), "?a=9&b=2");
    }

    #[test]
    fn test_countermodel_options_parse() {
        let location = Location::parse(
            "min_countermodel_graph_nodes=3&max_countermodel_graph_nodes=x&should_shuffle_countermodel_graphs=true",
        );
        let options = countermodel_options(&location);
        assert_eq!(options.min_nodes, Some(3));
        assert_eq!(options.max_nodes, None);
        assert!(options.shuffle);
    }

    #[test]
    fn test_split_premises_drops_blank_lines() {
        assert_eq!(split_premises("p\r\n  \n\nq ⊃ r\n"), ["p", "q ⊃ r"]);
    }
}
