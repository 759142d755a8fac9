//! Typed loads and stores at raw addresses.
//!
//! Every width goes through the same two functions. An aligned address gets a direct typed
//! access. A misaligned one is copied byte by byte through an aligned local so we never depend on
//! the CPU tolerating a misaligned access, and the compiler never gets to assume alignment it
//! cannot see.

use native_mem_common::*;

/// read a `T` in native byte order
///
/// # Safety
///
/// `[address, address + T::WIDTH)` must be readable memory owned by the caller.
pub unsafe fn load<T: Scalar>(address: Address) -> T {
    if address.is_aligned(T::WIDTH) {
        address.as_ptr::<T>().read()
    } else {
        let mut bytes = T::Bytes::default();
        std::ptr::copy_nonoverlapping(
            address.as_ptr::<u8>(),
            bytes.as_mut().as_mut_ptr(),
            T::WIDTH,
        );
        T::from_ne_bytes(bytes)
    }
}

/// write a `T` in native byte order
///
/// # Safety
///
/// `[address, address + T::WIDTH)` must be writable memory owned by the caller.
pub unsafe fn store<T: Scalar>(address: Address, value: T) {
    if address.is_aligned(T::WIDTH) {
        address.as_mut_ptr::<T>().write(value)
    } else {
        let bytes = value.to_ne_bytes();
        std::ptr::copy_nonoverlapping(
            bytes.as_ref().as_ptr(),
            address.as_mut_ptr::<u8>(),
            T::WIDTH,
        );
    }
}

/// read a `T` stored in `order`
///
/// # Safety
///
/// as for `load`.
pub unsafe fn load_ordered<T: Scalar>(address: Address, order: ByteOrder) -> T {
    let value = load::<T>(address);
    if order.needs_swap() {
        value.swap_bytes()
    } else {
        value
    }
}

/// write a `T` so that it ends up in memory in `order`
///
/// # Safety
///
/// as for `store`.
pub unsafe fn store_ordered<T: Scalar>(address: Address, value: T, order: ByteOrder) {
    if order.needs_swap() {
        store(address, value.swap_bytes())
    } else {
        store(address, value)
    }
}

macro_rules! named_accessors {
    ( $( $t:ty => $get:ident, $set:ident );* $(;)? ) => {
        $(
            /// # Safety
            ///
            /// as for `load`.
            pub unsafe fn $get(address: Address) -> $t {
                load::<$t>(address)
            }

            /// # Safety
            ///
            /// as for `store`.
            pub unsafe fn $set(address: Address, value: $t) {
                store::<$t>(address, value)
            }
        )*
    };
}

named_accessors! {
    i8 => get_byte, set_byte;
    i16 => get_short, set_short;
    i32 => get_int, set_int;
    i64 => get_long, set_long;
    f32 => get_float, set_float;
    f64 => get_double, set_double;
}
