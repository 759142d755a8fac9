use crate::env::HostEnv;
use crate::prelude::*;
use native_mem::access;
use native_mem::allocation;
use native_mem::bulk;

/// The full operation table in the managed caller's convention.
///
/// Addresses arrive as `i64`, array offsets and lengths as `i32`, swap flags as `bool`. The only
/// failure that reaches the caller from the primitives themselves is running out of memory,
/// which is thrown into `env` while `malloc` returns the null address. The argument checks done
/// here (negative lengths, array ranges) are thrown the same way and turn the call into a no-op.
///
/// Native addresses are trusted completely, hence every method that dereferences one is unsafe.
#[derive(Debug, Default)]
pub struct OsMemory<E, T> {
    env: E,
    tracker: T,
}

impl<E, T> OsMemory<E, T> {
    pub const fn new(env: E, tracker: T) -> Self {
        Self { env, tracker }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }
}

macro_rules! scalar_methods {
    ( $( $t:ty => $get:ident, $set:ident );* $(;)? ) => {
        $(
            /// # Safety
            ///
            /// the value's bytes at `address` must be readable memory owned by the caller.
            pub unsafe fn $get(&self, address: i64) -> $t {
                access::$get(Address::from(address))
            }

            /// # Safety
            ///
            /// the value's bytes at `address` must be writable memory owned by the caller.
            pub unsafe fn $set(&self, address: i64, value: $t) {
                access::$set(Address::from(address), value)
            }
        )*
    };
}

macro_rules! array_methods {
    ( $( $t:ty => $get:ident, $set:ident );* $(;)? ) => {
        $(
            /// # Safety
            ///
            /// as for `get_byte_array`.
            pub unsafe fn $get(&self, address: i64, dst: &mut [$t], offset: i32, length: i32, swap: bool) {
                if let Some((offset, length)) = self.range(offset, length, dst.len()) {
                    bulk::$get(Address::from(address), dst, offset, length, swap)
                }
            }

            /// # Safety
            ///
            /// as for `set_byte_array`.
            pub unsafe fn $set(&self, address: i64, src: &[$t], offset: i32, length: i32, swap: bool) {
                if let Some((offset, length)) = self.range(offset, length, src.len()) {
                    bulk::$set(Address::from(address), src, offset, length, swap)
                }
            }
        )*
    };
}

impl<E: HostEnv, T: AllocationTracker> OsMemory<E, T> {
    /// a non negative `length`, or throw
    fn length(&self, length: i64) -> Option<usize> {
        if length < 0 {
            self.env.throw(MemoryError::NegativeLength(length));
            return None;
        }
        match usize::try_from(length) {
            Ok(length) => Some(length),
            Err(e) => {
                self.env.throw(e.into());
                None
            }
        }
    }

    /// `offset` and `length` as a range that fits an array of `capacity` items, or throw
    fn range(&self, offset: i32, length: i32, capacity: usize) -> Option<(usize, usize)> {
        let offset = self.length(offset.into())?;
        let length = self.length(length.into())?;
        match offset.checked_add(length) {
            Some(end) if end <= capacity => Some((offset, length)),
            _ => {
                self.env.throw(MemoryError::OutOfBounds {
                    index: offset as u64,
                    len: length as u64,
                    capacity: capacity as u64,
                });
                None
            }
        }
    }

    /// allocate `size` bytes, returning 0 after throwing if that is not possible
    pub fn malloc(&self, size: i64) -> i64 {
        let size = match self.length(size) {
            Some(size) => size as u64,
            None => return Address::NULL.into(),
        };
        match allocation::allocate_tracked(size, &self.tracker) {
            Ok(address) => address.into(),
            Err(error) => {
                self.env.throw(error);
                Address::NULL.into()
            }
        }
    }

    /// # Safety
    ///
    /// `address` must be 0 or a live address returned by `malloc` on an OsMemory using an
    /// equivalent tracker.
    pub unsafe fn free(&self, address: i64) {
        allocation::deallocate_tracked(Address::from(address), &self.tracker)
    }

    /// # Safety
    ///
    /// `length` bytes at `address` must be writable memory owned by the caller.
    pub unsafe fn memset(&self, address: i64, value: i8, length: i64) {
        if let Some(length) = self.length(length) {
            bulk::memset(Address::from(address), value as u8, length)
        }
    }

    /// # Safety
    ///
    /// `length` bytes at each address must be memory owned by the caller.
    pub unsafe fn memmove(&self, dst: i64, src: i64, length: i64) {
        if let Some(length) = self.length(length) {
            bulk::memmove(Address::from(dst), Address::from(src), length)
        }
    }

    scalar_methods! {
        i8 => get_byte, set_byte;
        i16 => get_short, set_short;
        i32 => get_int, set_int;
        i64 => get_long, set_long;
        f32 => get_float, set_float;
        f64 => get_double, set_double;
    }

    /// read a value stored in `order` rather than native order
    ///
    /// # Safety
    ///
    /// as for the native order getters.
    pub unsafe fn get_ordered<S: Scalar>(&self, address: i64, order: ByteOrder) -> S {
        access::load_ordered(Address::from(address), order)
    }

    /// # Safety
    ///
    /// as for the native order setters.
    pub unsafe fn set_ordered<S: Scalar>(&self, address: i64, value: S, order: ByteOrder) {
        access::store_ordered(Address::from(address), value, order)
    }

    /// # Safety
    ///
    /// `length` bytes at `address` must be readable memory owned by the caller.
    pub unsafe fn get_byte_array(&self, address: i64, dst: &mut [i8], offset: i32, length: i32) {
        if let Some((offset, length)) = self.range(offset, length, dst.len()) {
            bulk::load_array(Address::from(address), dst, offset, length, false)
        }
    }

    /// # Safety
    ///
    /// `length` bytes at `address` must be writable memory owned by the caller.
    pub unsafe fn set_byte_array(&self, address: i64, src: &[i8], offset: i32, length: i32) {
        if let Some((offset, length)) = self.range(offset, length, src.len()) {
            bulk::store_array(Address::from(address), src, offset, length, false)
        }
    }

    array_methods! {
        i16 => get_short_array, set_short_array;
        i32 => get_int_array, set_int_array;
        i64 => get_long_array, set_long_array;
        f32 => get_float_array, set_float_array;
        f64 => get_double_array, set_double_array;
    }
}
