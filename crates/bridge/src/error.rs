use crate::prelude::*;

/// Stable numbers for errors crossing the C boundary.
///
/// Zero always means nothing went wrong. A tracker veto is reported as out of memory because
/// that is what the managed caller would see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    None = 0,
    OutOfMemory = 1,
    NegativeLength = 2,
    OutOfBounds = 3,
    PointerMap = 4,
}

impl From<&MemoryError> for ErrorCode {
    fn from(error: &MemoryError) -> Self {
        match error {
            MemoryError::OutOfMemory { .. } | MemoryError::TrackerRejected { .. } => {
                ErrorCode::OutOfMemory
            }
            MemoryError::NegativeLength(_) => ErrorCode::NegativeLength,
            MemoryError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            MemoryError::PointerMap => ErrorCode::PointerMap,
        }
    }
}

impl From<Option<MemoryError>> for ErrorCode {
    fn from(error: Option<MemoryError>) -> Self {
        error.as_ref().map_or(ErrorCode::None, ErrorCode::from)
    }
}
