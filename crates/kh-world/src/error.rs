/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when loading or saving a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The world document could not be decoded or encoded.
    #[error("invalid world document: {0}")]
    Json(#[from] serde_json::Error),

    /// The world has no rooms, so there is nowhere to start.
    #[error("world has no rooms")]
    NoRooms,
}
