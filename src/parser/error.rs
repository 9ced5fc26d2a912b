use thiserror::Error;

use super::Rule;

#[derive(Debug, Error)]
pub enum ParseError {
    /// Non-blank input in which not a single `(x,y)` pair could be found.
    #[error("invalid input format, expected pairs like (1,2), (a,b)")]
    MalformedInput,

    #[error("relation mentions {count} elements, more than the limit of {limit}")]
    TooManyElements { count: usize, limit: usize },

    #[error("{0}")]
    Grammar(#[from] Box<pest::error::Error<Rule>>),
}

impl ParseError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseError::MalformedInput)
    }
}
