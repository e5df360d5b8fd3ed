//! Error type shared by every stage of the inference pipeline.

use crate::lexer::Token;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can abort a solve.
///
/// All errors are terminal: the pipeline is a pure function of its inputs,
/// so there is no partial result and nothing to retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unknown event: {0:?}")]
    UnknownEvent(String),

    #[error("expected {expected}, found {}", describe(.found))]
    UnexpectedToken {
        expected: &'static str,
        found: Option<Token>,
    },

    #[error("unexpected trailing input starting at '{token}'")]
    TrailingInput { token: Token },

    #[error("insufficient or conflicting information")]
    Underdetermined,

    #[error("tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    #[error("the list of simple events is empty")]
    EmptyEventList,

    #[error("simple event labels must be non-empty")]
    EmptyEventLabel,

    #[error("duplicate simple event: {0:?}")]
    DuplicateEvent(String),

    #[error("too many simple events: {count} (at most {max} are supported)")]
    TooManyEvents { count: usize, max: usize },

    #[error("no expressions given")]
    NoExpressions,

    #[error("every expression has a known probability, nothing to solve for")]
    MissingUnknown,

    #[error("expressions #{first} and #{second} both lack a known probability")]
    MultipleUnknowns { first: usize, second: usize },
}

fn describe(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("'{}'", token),
        None => "end of input".to_string(),
    }
}
