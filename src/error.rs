use std::{error::Error as StdError, fmt, io, result::Result as StdResult};

/// Failures at the solving engine boundary.
#[derive(Debug, Clone)]
pub enum EngineError {
    NotConfigured,
    SpawnFailed { command: String, reason: String },
    InvalidRequest(String),
    Failed { status: Option<i32>, stderr: String },
    InvalidOutput(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => {
                writeln!(f, "No solving engine configured.")?;
                writeln!(f)?;
                writeln!(f, "Pass --engine <command> or add to config.toml:")?;
                writeln!(f)?;
                writeln!(f, "  [engine]")?;
                write!(f, "  command = \"/path/to/engine\"")
            }
            Self::SpawnFailed { command, reason } => {
                writeln!(f, "Failed to start solving engine `{command}`")?;
                writeln!(f)?;
                write!(f, "Reason: {reason}")
            }
            Self::InvalidRequest(msg) => write!(f, "Could not serialize problem: {msg}"),
            Self::Failed {
                status: Some(code),
                stderr,
            } => write!(f, "Engine exited with status {code}: {stderr}"),
            Self::Failed {
                status: None,
                stderr,
            } => write!(f, "Engine was terminated: {stderr}"),
            Self::InvalidOutput(msg) => write!(f, "Engine returned invalid output: {msg}"),
        }
    }
}

impl StdError for EngineError {}

/// Failures while building the panel workspace. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnregisteredPanel(String),
    DuplicatePanel(String),
    EmptyStack,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredPanel(name) => write!(f, "No factory registered for panel `{name}`"),
            Self::DuplicatePanel(name) => write!(f, "Panel `{name}` appears more than once"),
            Self::EmptyStack => write!(f, "Stack contains no panels"),
        }
    }
}

impl StdError for LayoutError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    UnknownLogic(String),
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLogic(logic) => write!(f, "Unknown logic `{logic}`"),
            Self::IndexOutOfRange { kind, index, len } => {
                write!(f, "{kind} index {index} out of range (have {len})")
            }
        }
    }
}

impl StdError for SelectorError {}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    TomlRead(toml::de::Error),
    TomlWrite(toml::ser::Error),
    Engine(EngineError),
    Layout(LayoutError),
    Selector(SelectorError),
    Config(String),
    /// The query string lacks logic, premises or conclusion.
    MissingProblem(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::TomlRead(e) => write!(f, "Config parse error: {e}"),
            Self::TomlWrite(e) => write!(f, "Config write error: {e}"),
            Self::Engine(e) => write!(f, "{e}"),
            Self::Layout(e) => write!(f, "Layout error: {e}"),
            Self::Selector(e) => write!(f, "Logic selection error: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::MissingProblem(query) => {
                write!(f, "Query `{query}` needs logic, premises and conclusion")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::TomlRead(e) => Some(e),
            Self::TomlWrite(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Layout(e) => Some(e),
            Self::Selector(e) => Some(e),
            Self::Config(_) | Self::MissingProblem(_) => None,
        }
    }
}

impl From<EngineError> for Error {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<SelectorError> for Error {
    fn from(e: SelectorError) -> Self {
        Self::Selector(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::TomlRead(e)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Self::TomlWrite(e)
    }
}

pub type Result<T> = StdResult<T, Error>;
