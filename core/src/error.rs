use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be square and non-empty")]
    InvalidBoardShape,
    #[error("Board size and move limit must both be at least 1")]
    InvalidConfig,
    #[error("Color is not part of the palette")]
    InvalidColor,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("No active session for this key")]
    UnknownSession,
    #[error("Room is locked")]
    RoomLocked,
    #[error("Saved game does not match its board")]
    InconsistentState,
}

pub type Result<T> = core::result::Result<T, GameError>;
