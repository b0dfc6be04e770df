use thiserror::Error;

/// The grammar is ill-formed, or an operation named a symbol it cannot act on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("grammar is empty")]
    Empty,

    #[error("start symbol `{0}` is not a non-terminal")]
    StartSymbolNotNonTerminal(String),

    #[error("`{0}` is both a terminal and a non-terminal")]
    NotDisjoint(String),

    #[error("left side `{0}` is not a non-terminal")]
    UnknownLeftSide(String),

    #[error("grammar must be context free, found left side `{0}`")]
    NotContextFree(String),

    #[error("symbol `{0}` must be a non-terminal")]
    NotNonTerminal(String),
}

/// The grammar source could not be read as a grammar.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unable to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// A transformation was requested before the grammar was ready for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("remove epsilon-productions first")]
    EpsilonProductions,

    #[error("remove cycles first")]
    Cycles,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("unable to read grammar: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("unknown transformation `{0}`")]
    UnknownTransformation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
