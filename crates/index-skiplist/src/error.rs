use thiserror::Error;


/// An error returned when constructing a [`SkipList`](crate::SkipList) with invalid parameters.
///
/// Per the design notes of this crate, only configuration errors are ever surfaced to the
/// caller; range violations, membership violations, and comparator misbehavior are all caller
/// errors that this crate does not attempt to detect at runtime (see the crate's `DESIGN.md`).
#[derive(Error, Debug, Clone, Copy)]
pub enum ConfigError {
    /// `capacity` must be at least `1`.
    #[error("capacity must be at least 1, got {0}")]
    ZeroCapacity(u32),
    /// `ratio` must lie in `[0, 1]`; `NaN` is rejected as well.
    #[error("ratio must lie in [0, 1], got {0}")]
    InvalidRatio(f64),
}
