use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Recoverable signals raised by tree mutations.
///
/// Neither variant is fatal: a failed removal leaves the tree exactly as it
/// was. Callers that want a "silently ignore" behavior can simply discard
/// the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("tree is empty, nothing to delete")]
    EmptyTree,

    #[error("value is not present in the tree")]
    NotFound,
}
