/// Which backing store a piece points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    /// The memory-mapped file the engine was opened on.
    Original,
    /// The append-only buffer holding inserted text.
    Add,
}

/// Direction of a line scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, PartialEq)]
pub enum MathError {
    /// Wraps the specific error TryInto generates
    ConversionFailed(std::num::TryFromIntError),
    /// Represents the `None` case from checked math
    Overflow,
}

impl std::fmt::Display for MathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MathError::ConversionFailed(e) => write!(f, "integer conversion failed: {e}"),
            MathError::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}

impl std::error::Error for MathError {}

impl From<std::num::TryFromIntError> for MathError {
    fn from(err: std::num::TryFromIntError) -> Self {
        MathError::ConversionFailed(err)
    }
}
