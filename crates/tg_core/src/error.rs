/// Errors reported by terrain generation and point queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The generation config cannot be honoured.
    #[error("invalid generation config: {0}")]
    InvalidConfig(String),

    /// A point query arrived before any map was stored.
    #[error("no map has been generated yet")]
    NoMapGenerated,

    /// A point query fell outside the stored map.
    #[error("point ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
}

pub type TerrainResult<T> = Result<T, TerrainError>;
