use serde::Deserialize;
use serde::Serialize;

/// The order of bytes within a multi byte value in memory.
///
/// Single scalar access always happens in native order. Bulk transfers and the order-aware
/// accessors compare against `ByteOrder::NATIVE` to decide whether bytes need reversing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    pub const fn is_native(self) -> bool {
        matches!(
            (self, Self::NATIVE),
            (ByteOrder::BigEndian, ByteOrder::BigEndian)
                | (ByteOrder::LittleEndian, ByteOrder::LittleEndian)
        )
    }

    /// the swap flag a bulk transfer needs to move values between native order and `self`
    pub const fn needs_swap(self) -> bool {
        !self.is_native()
    }

    pub const fn opposite(self) -> Self {
        match self {
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
        }
    }
}

impl Default for ByteOrder {
    /// managed buffers start out big endian regardless of the host
    fn default() -> Self {
        ByteOrder::BigEndian
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ByteOrder::BigEndian => write!(f, "BIG_ENDIAN"),
            ByteOrder::LittleEndian => write!(f, "LITTLE_ENDIAN"),
        }
    }
}
