//! Execution log lines → fixed-width table rows.

pub const COLUMNS: usize = 4;

pub const HEADER: [&str; COLUMNS] = [
    "Tree execution",
    "Graph execution",
    "Contradictions",
    "RAM usage",
];

/// Left to right, top to bottom; the last row may be short.
pub fn rows(lines: &[String]) -> Vec<Vec<String>> {
    lines.chunks(COLUMNS).map(<[String]>::to_vec).collect()
}
