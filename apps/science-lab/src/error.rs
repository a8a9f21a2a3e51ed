use thiserror::Error;

/// Startup and navigation failures.
#[derive(Debug, Error)]
pub enum LabError {
    #[error("malformed catalog data: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("duplicate module id `{0}`")]
    DuplicateModule(String),
    #[error("quiz question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
    #[error("unknown module `{0}`")]
    UnknownModule(String),
}

/// Rejected quiz interactions. None of these change quiz state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("select an answer before continuing")]
    NoSelection,
    #[error("option {index} does not exist (question has {count})")]
    InvalidOption { index: usize, count: usize },
    #[error("the quiz has not been started")]
    NotStarted,
    #[error("the quiz is already finished")]
    Finished,
}

/// Tutor failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("a reply is already in progress")]
    Busy,
    #[error("cannot send an empty message")]
    EmptyPrompt,
    #[error("the tutor has not been configured")]
    NotConfigured,
    #[error("chat service failed: {0}")]
    Service(String),
    #[error("unexpected chat service response: {0}")]
    MalformedResponse(String),
}
