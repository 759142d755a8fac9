use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Enum of everything that can go wrong in a way the caller can observe.
///
/// The raw primitives trust their caller completely, so most misuse is undefined behaviour and
/// never shows up here. What is left is allocation failure plus the handful of checks the bridge
/// and the owning buffer perform before handing work to the raw layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Error)]
#[rustfmt::skip]
pub enum MemoryError {
    /// the system allocator had nothing for us
    /// reported to the managed caller as its own out of memory condition
    #[error("out of memory allocating {size} bytes")]
    OutOfMemory { size: u64 },
    /// the allocation tracker vetoed the request before it reached the system allocator
    /// the bridge reports this to the managed caller exactly like OutOfMemory
    #[error("external allocation of {size} bytes was rejected")]
    TrackerRejected { size: u64 },
    /// a size or length arrived from the managed caller as a negative number
    #[error("negative length {0}")]
    NegativeLength(i64),
    /// a range of `len` items starting at `index` runs past the `capacity` of a managed array or
    /// an owning buffer
    #[error("{len} items at index {index} out of bounds for capacity {capacity}")]
    OutOfBounds { index: u64, len: u64, capacity: u64 },
    /// while converting addresses and lengths between i64, u64 and usize we hit a value that
    /// does not fit in the target type
    /// on a 32 bit host this is a very large length, anywhere else it is a critical bug
    #[error("address or length does not fit the native word")]
    PointerMap,
}

impl MemoryError {
    /// true for the conditions the managed caller sees as running out of memory
    pub fn is_out_of_memory(&self) -> bool {
        matches!(
            self,
            MemoryError::OutOfMemory { .. } | MemoryError::TrackerRejected { .. }
        )
    }
}

impl From<std::num::TryFromIntError> for MemoryError {
    fn from(_: std::num::TryFromIntError) -> Self {
        Self::PointerMap
    }
}

pub type MemoryResult<T> = Result<T, MemoryError>;
