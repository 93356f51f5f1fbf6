use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("Coordinates outside the board")]
    InvalidCoords,
    #[error("Mine count does not fit the board")]
    TooManyMines,
    #[error("Clue {0} is outside the 0..=8 range")]
    InvalidClue(u8),
    #[error("Episode already ended, no further moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, AgentError>;
