use thiserror::Error;

// ---------------------------------------------------------------------------
// TokenizeError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated {quote} quote: {fragment}")]
    UnterminatedQuote { quote: char, fragment: String },

    #[error("unterminated tag (missing '>'): {fragment}")]
    UnterminatedTag { fragment: String },

    #[error("empty tag '<>' at column {}: tags need a name, e.g. <urgent>", .offset + 1)]
    EmptyTag { offset: usize },

    #[error("unexpected '>' at column {} without a matching '<'", .offset + 1)]
    UnexpectedTagClose { offset: usize },
}

// ---------------------------------------------------------------------------
// ParseError
// ---------------------------------------------------------------------------

/// A malformed command. `usage` is always a corrected example the user can
/// type next.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}\n  usage: {usage}")]
pub struct ParseError {
    pub reason: String,
    pub usage: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            usage: usage.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TodoError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{}", ambiguity_message(.identifier, .candidates))]
    AmbiguousIdentifier {
        identifier: String,
        candidates: Vec<Candidate>,
    },

    #[error("no task at position {position}: the list has {len} task(s)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("cannot {operation} while in {state}")]
    InvalidStateOperation { state: String, operation: String },

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("not initialized: run 'todo init'")]
    NotInitialized,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

fn ambiguity_message(identifier: &str, candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return format!("no task matches '{identifier}'");
    }
    let listed: Vec<String> = candidates
        .iter()
        .map(|c| format!("  {} ({})", c.title, c.id))
        .collect();
    format!(
        "'{identifier}' matches {} tasks; use a number or id instead:\n{}",
        candidates.len(),
        listed.join("\n")
    )
}

pub type Result<T> = std::result::Result<T, TodoError>;
