pub mod byte_order;
pub mod result;
pub mod scalar;
pub mod swap;

pub use byte_order::ByteOrder;
pub use result::*;
pub use scalar::Scalar;

/// something like usize for native memory
///
/// the managed caller hands addresses over as wide signed integers, so we need a predictable
/// number of bytes to hold a full pointer regardless of the host's `usize`.
/// 64 bits covers every host we care about, a 32 bit host simply never sets the high half.
pub type NativeSize = u64;

pub type Len = NativeSize;

/// Address is a native byte address with no type information attached
///
/// it is deliberately not a pointer: nothing about an Address says how many bytes live behind it
/// or how they should be interpreted, the caller's request decides that.
/// all dereferencing goes through the accessor and bulk transfer functions so the unsafe surface
/// stays in one place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Address(NativeSize);

impl Address {
    /// the failure sentinel returned across the bridge when an allocation fails
    pub const NULL: Address = Address(0);

    pub const fn new(raw: NativeSize) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> NativeSize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// byte offset forwards, wrapping like raw pointer arithmetic on the caller's side would
    pub const fn add(self, bytes: Len) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// byte offset backwards
    pub const fn sub(self, bytes: Len) -> Self {
        Self(self.0.wrapping_sub(bytes))
    }

    /// true if the address is a multiple of `width`
    /// widths of 0 and 1 are always aligned
    pub const fn is_aligned(self, width: usize) -> bool {
        width <= 1 || self.0 & (width as NativeSize - 1) == 0
    }

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize as NativeSize)
    }

    pub fn as_ptr<T>(self) -> *const T {
        self.0 as usize as *const T
    }

    pub fn as_mut_ptr<T>(self) -> *mut T {
        self.0 as usize as *mut T
    }
}

/// the managed caller passes addresses as signed 64 bit integers
/// negative values are just addresses with the high bit set, nothing is lost
impl From<i64> for Address {
    fn from(raw: i64) -> Self {
        Self(raw as NativeSize)
    }
}

impl From<Address> for i64 {
    fn from(address: Address) -> i64 {
        address.0 as i64
    }
}

impl From<NativeSize> for Address {
    fn from(raw: NativeSize) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
