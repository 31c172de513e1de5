use std::error::Error;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use crate::pipeline::state::Stage;

/// Error raised when the run configuration is invalid
///
/// Surfaced before any stage executes. Carries a user-facing
/// description of the offending option combination.
pub struct ConfigError {
    message: String,
}

impl Error for ConfigError {}

impl ConfigError {
    pub fn new<S: fmt::Display>(s: S) -> Self {
        Self {
            message: s.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // user-facing error
        write!(f, "Invalid configuration: {}", self.message)
    }
}

impl fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // developer-facing error
        write!(f, "{{ file: {}, line: {} }}", file!(), line!())
    }
}

impl From<String> for ConfigError {
    fn from(e: String) -> ConfigError {
        ConfigError { message: e }
    }
}

impl From<&str> for ConfigError {
    fn from(e: &str) -> ConfigError {
        ConfigError {
            message: e.to_string(),
        }
    }
}

/// Filesystem failure tied to a concrete path
pub struct IoError {
    kind: std::io::ErrorKind,
    path: PathBuf,
    message: String,
}

impl Error for IoError {}

impl IoError {
    pub fn new<P: Into<PathBuf>>(err: &std::io::Error, path: P) -> Self {
        Self {
            kind: err.kind(),
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn other<P: Into<PathBuf>, S: fmt::Display>(path: P, msg: S) -> Self {
        Self {
            kind: std::io::ErrorKind::Other,
            path: path.into(),
            message: msg.to_string(),
        }
    }

    pub fn kind(&self) -> std::io::ErrorKind {
        self.kind
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // user-facing error
        write!(f, "IO error at {}: {}", self.path.display(), self.message)
    }
}

impl fmt::Debug for IoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // developer-facing error
        write!(f, "{{ file: {}, line: {} }}", file!(), line!())
    }
}

/// Error raised while parsing an input or tool-output file
///
/// Always fatal: the offending file is not trusted once a line
/// fails to parse.
pub struct ParseError {
    pub file: String,
    pub line: usize,
    pub reason: String,
}

impl Error for ParseError {}

impl ParseError {
    pub fn new<F: fmt::Display, S: fmt::Display>(file: F, line: usize, reason: S) -> Self {
        Self {
            file: file.to_string(),
            line,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // user-facing error
        write!(
            f,
            "An error occurred while parsing {} (line {}). Please check your input data.\n{}",
            self.file, self.line, self.reason
        )
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // developer-facing error
        write!(f, "{{ file: {}, line: {} }}", file!(), line!())
    }
}

impl From<ParseIntError> for ParseError {
    fn from(e: ParseIntError) -> ParseError {
        ParseError::new("<unknown>", 0, format!("Unable to parse an integer {}", e))
    }
}

impl From<ParseFloatError> for ParseError {
    fn from(e: ParseFloatError) -> ParseError {
        ParseError::new("<unknown>", 0, format!("Unable to parse a float {}", e))
    }
}

/// Fatal failure of a pipeline stage
pub struct StageError {
    pub stage: Stage,
    pub reason: String,
}

impl Error for StageError {}

impl StageError {
    pub fn new<S: fmt::Display>(stage: Stage, reason: S) -> Self {
        Self {
            stage,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // user-facing error
        write!(f, "Stage {} failed: {}", self.stage, self.reason)
    }
}

impl fmt::Debug for StageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // developer-facing error
        write!(f, "{{ file: {}, line: {} }}", file!(), line!())
    }
}

/// A third-party executable exited abnormally
///
/// The stage's partial outputs are deleted by the caller so that a
/// rerun can resume from clean state.
pub struct ExternalToolError {
    pub tool: String,
    pub exit_code: Option<i32>,
    pub stderr_tail: String,
}

impl Error for ExternalToolError {}

impl ExternalToolError {
    pub fn new<T: fmt::Display, S: fmt::Display>(
        tool: T,
        exit_code: Option<i32>,
        stderr_tail: S,
    ) -> Self {
        Self {
            tool: tool.to_string(),
            exit_code,
            stderr_tail: stderr_tail.to_string(),
        }
    }

    pub fn version_unsupported<T: fmt::Display, S: fmt::Display>(tool: T, detail: S) -> Self {
        Self {
            tool: tool.to_string(),
            exit_code: None,
            stderr_tail: format!("unsupported version: {}", detail),
        }
    }
}

impl fmt::Display for ExternalToolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // user-facing error
        match self.exit_code {
            Some(code) => write!(
                f,
                "{} exited with code {}: {}",
                self.tool, code, self.stderr_tail
            ),
            None => write!(f, "{} failed: {}", self.tool, self.stderr_tail),
        }
    }
}

impl fmt::Debug for ExternalToolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // developer-facing error
        write!(f, "{{ file: {}, line: {} }}", file!(), line!())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Taxonomy,
    GeneOntology,
    Uniprot,
    Eggnog,
    Entrez,
}

/// Failure of one of the reference databases
///
/// Recoverable when the affected feature is optional (additional
/// UniProt fields), fatal for required taxonomy lookups.
pub struct DatabaseError {
    pub kind: DatabaseKind,
    pub detail: String,
}

impl Error for DatabaseError {}

impl DatabaseError {
    pub fn new<S: fmt::Display>(kind: DatabaseKind, detail: S) -> Self {
        Self {
            kind,
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // user-facing error
        write!(
            f,
            "Reference database error ({:?}): {}",
            self.kind, self.detail
        )
    }
}

impl fmt::Debug for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // developer-facing error
        write!(f, "{{ file: {}, line: {} }}", file!(), line!())
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(e: rusqlite::Error) -> DatabaseError {
        DatabaseError::new(DatabaseKind::Eggnog, e.to_string())
    }
}

/// Top-level error of a pipeline run
///
/// Wraps every typed error and maps it to a numeric exit category.
pub enum RunError {
    Config(ConfigError),
    Io(IoError),
    Parse(ParseError),
    Stage(StageError),
    Tool(ExternalToolError),
    Database(DatabaseError),
}

impl RunError {
    /// Numeric exit-status category for the process
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Parse(_) => 10,
            RunError::Config(_) => 11,
            RunError::Io(_) => 12,
            RunError::Database(_) => 13,
            RunError::Stage(_) => 14,
            RunError::Tool(_) => 15,
        }
    }
}

impl Error for RunError {}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "{}", e),
            RunError::Io(e) => write!(f, "{}", e),
            RunError::Parse(e) => write!(f, "{}", e),
            RunError::Stage(e) => write!(f, "{}", e),
            RunError::Tool(e) => write!(f, "{}", e),
            RunError::Database(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Debug for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // developer-facing error
        write!(f, "{{ file: {}, line: {} }}", file!(), line!())
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> RunError {
        RunError::Config(e)
    }
}

impl From<IoError> for RunError {
    fn from(e: IoError) -> RunError {
        RunError::Io(e)
    }
}

impl From<ParseError> for RunError {
    fn from(e: ParseError) -> RunError {
        RunError::Parse(e)
    }
}

impl From<StageError> for RunError {
    fn from(e: StageError) -> RunError {
        RunError::Stage(e)
    }
}

impl From<ExternalToolError> for RunError {
    fn from(e: ExternalToolError) -> RunError {
        RunError::Tool(e)
    }
}

impl From<DatabaseError> for RunError {
    fn from(e: DatabaseError) -> RunError {
        RunError::Database(e)
    }
}
