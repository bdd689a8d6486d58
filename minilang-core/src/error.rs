use thiserror::Error;

/// Failure while translating a postfix stream.
///
/// `position` is the zero-based index of the offending token in the
/// whitespace-split stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("token {position} ('{token}') is missing an operand")]
    MissingOperand { token: String, position: usize },
}
