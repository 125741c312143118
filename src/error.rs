use thiserror::Error;

use crate::utilities::Chips;

/// Reasons an engine operation is refused. A refused operation leaves the
/// state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unsupported player count {0}, expected 2 to 10")]
    PlayerCount(usize),
    #[error("the hand is complete, no seat is left to act")]
    HandComplete,
    #[error("cannot check, {owed} is owed")]
    CannotCheck { owed: Chips },
    #[error("nothing to call")]
    NothingToCall,
    #[error("stack of {stack} cannot raise over the {owed} owed")]
    CannotRaise { stack: Chips, owed: Chips },
    #[error("raising to {to} adds nothing over the {committed} already committed")]
    EmptyRaise { to: Chips, committed: Chips },
    #[error("no seat at index {0}")]
    SeatIndex(usize),
    #[error("invalid board: {0}")]
    Board(String),
    #[error("invalid action token '{0}'")]
    Script(String),
    #[error("nothing to undo")]
    NothingToUndo,
}

pub type Result<T> = std::result::Result<T, EngineError>;
