//! Error types. The engine itself never fails once constructed.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Cell size must be at least 1 unit.")]
    ZeroCellSize,
    #[error("Grid of {cols}x{rows} cells is too small, need at least {min_cols}x{min_rows}.")]
    GridTooSmall {
        cols: i32,
        rows: i32,
        min_cols: i32,
        min_rows: i32,
    },
    #[error("Grid of {cols}x{rows} cells is too large, each side may be at most {max_side}.")]
    GridTooLarge { cols: i32, rows: i32, max_side: i32 },
    #[error("Minimum interval {min_ms}ms is above the base interval {base_ms}ms.")]
    IntervalRange { base_ms: u32, min_ms: u32 },
    #[error("Base interval must be at least 1ms.")]
    ZeroInterval,
}

/// Failure reported by a persistence collaborator. Callers treat every variant the same way.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
    #[error("Storage rejected the write for `{key}`.")]
    Rejected { key: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
