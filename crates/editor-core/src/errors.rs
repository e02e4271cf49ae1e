pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug)]
pub enum EngineError {
    /// The file could not be opened, mapped, or written.
    Io(std::io::Error),
    /// A byte offset did not fit the platform's address width.
    Conversion(std::num::TryFromIntError),
    /// The worker pool could not be started.
    WorkerPool(rayon::ThreadPoolBuildError),
    /// Line or byte arithmetic overflowed.
    Overflow,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Io(e) => write!(f, "i/o error: {e}"),
            EngineError::Conversion(e) => write!(f, "offset conversion failed: {e}"),
            EngineError::WorkerPool(e) => write!(f, "could not start worker pool: {e}"),
            EngineError::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            EngineError::Conversion(e) => Some(e),
            EngineError::WorkerPool(e) => Some(e),
            EngineError::Overflow => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        EngineError::Io(value)
    }
}

impl From<rayon::ThreadPoolBuildError> for EngineError {
    fn from(value: rayon::ThreadPoolBuildError) -> Self {
        EngineError::WorkerPool(value)
    }
}

impl From<crate::enums::MathError> for EngineError {
    fn from(value: crate::enums::MathError) -> Self {
        match value {
            crate::enums::MathError::ConversionFailed(val) => EngineError::Conversion(val),
            crate::enums::MathError::Overflow => EngineError::Overflow,
        }
    }
}
