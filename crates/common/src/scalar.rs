mod sealed {
    pub trait Sealed {}
}

/// A fixed width value that can live at a raw address.
///
/// Implemented for the 1, 2, 4 and 8 byte integers plus f32 and f64. Sealed so the accessors can
/// rely on `WIDTH` being a power of two and on every bit pattern of `Bytes` being a valid value.
pub trait Scalar: sealed::Sealed + Copy + Default + PartialEq + std::fmt::Debug + 'static {
    /// size in bytes, also the natural alignment
    const WIDTH: usize;

    /// the in-memory representation, always `[u8; WIDTH]`
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Copy + Default;

    fn to_ne_bytes(self) -> Self::Bytes;

    fn from_ne_bytes(bytes: Self::Bytes) -> Self;

    /// reverse the in-memory byte order
    /// floats swap their bit pattern, not their value
    fn swap_bytes(self) -> Self;
}

macro_rules! scalar_int {
    ( $( $t:ty ),* ) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();
                type Bytes = [u8; std::mem::size_of::<$t>()];

                fn to_ne_bytes(self) -> Self::Bytes {
                    <$t>::to_ne_bytes(self)
                }

                fn from_ne_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_ne_bytes(bytes)
                }

                fn swap_bytes(self) -> Self {
                    <$t>::swap_bytes(self)
                }
            }
        )*
    };
}

macro_rules! scalar_float {
    ( $( $t:ty => $bits:ty ),* ) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();
                type Bytes = [u8; std::mem::size_of::<$t>()];

                fn to_ne_bytes(self) -> Self::Bytes {
                    <$t>::to_ne_bytes(self)
                }

                fn from_ne_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_ne_bytes(bytes)
                }

                fn swap_bytes(self) -> Self {
                    <$t>::from_bits(<$bits>::swap_bytes(self.to_bits()))
                }
            }
        )*
    };
}

scalar_int!(i8, u8, i16, u16, i32, u32, i64, u64);
scalar_float!(f32 => u32, f64 => u64);
