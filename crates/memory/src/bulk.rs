//! Copies between managed arrays and raw memory, plus raw fill and move.
//!
//! Stores land in native order and are swapped in place afterwards when asked. Loads copy the
//! native bytes out untouched and swap the managed copy, so reading never modifies the region it
//! reads from.
//!
//! The managed side is an ordinary slice, so a bad `offset + length` panics on indexing. The raw
//! side is trusted completely.

use native_mem_common::swap;
use native_mem_common::*;

/// the `length * T::WIDTH` bytes at `address` as a mutable byte slice
///
/// # Safety
///
/// the region must be writable memory owned by the caller and `length` must be non zero.
unsafe fn raw_region<'a, T: Scalar>(address: Address, length: usize) -> &'a mut [u8] {
    std::slice::from_raw_parts_mut(address.as_mut_ptr::<u8>(), length * T::WIDTH)
}

/// copy `src[offset..offset + length]` to `dst`, byte reversing each element there if `swap`
///
/// # Safety
///
/// `[dst, dst + length * T::WIDTH)` must be writable memory owned by the caller and must not
/// overlap `src`.
pub unsafe fn store_array<T: Scalar>(
    dst: Address,
    src: &[T],
    offset: usize,
    length: usize,
    swap: bool,
) {
    let src = &src[offset..offset + length];
    if length == 0 {
        return;
    }
    std::ptr::copy_nonoverlapping(
        src.as_ptr().cast::<u8>(),
        dst.as_mut_ptr::<u8>(),
        length * T::WIDTH,
    );
    if swap {
        swap::swap_run(raw_region::<T>(dst, length), T::WIDTH, length);
    }
}

/// copy `length` elements from `src` into `dst[offset..offset + length]`, byte reversing each
/// copied element if `swap`
///
/// # Safety
///
/// `[src, src + length * T::WIDTH)` must be readable memory owned by the caller and must not
/// overlap `dst`.
pub unsafe fn load_array<T: Scalar>(
    src: Address,
    dst: &mut [T],
    offset: usize,
    length: usize,
    swap: bool,
) {
    let dst = &mut dst[offset..offset + length];
    if length == 0 {
        return;
    }
    std::ptr::copy_nonoverlapping(
        src.as_ptr::<u8>(),
        dst.as_mut_ptr().cast::<u8>(),
        length * T::WIDTH,
    );
    if swap {
        for value in dst.iter_mut() {
            *value = value.swap_bytes();
        }
    }
}

/// bytes have no byte order so there is nothing to swap
///
/// # Safety
///
/// as for `store_array`.
pub unsafe fn store_byte_array(dst: Address, src: &[u8], offset: usize, length: usize) {
    store_array(dst, src, offset, length, false)
}

/// # Safety
///
/// as for `load_array`.
pub unsafe fn load_byte_array(src: Address, dst: &mut [u8], offset: usize, length: usize) {
    load_array(src, dst, offset, length, false)
}

/// fill `length` bytes at `address` with `value`
///
/// # Safety
///
/// the region must be writable memory owned by the caller.
pub unsafe fn memset(address: Address, value: u8, length: usize) {
    std::ptr::write_bytes(address.as_mut_ptr::<u8>(), value, length)
}

/// copy `length` bytes from `src` to `dst`
/// overlapping regions behave as if the bytes went through an intermediate buffer
///
/// # Safety
///
/// both regions must be memory owned by the caller, `src` readable and `dst` writable.
pub unsafe fn memmove(dst: Address, src: Address, length: usize) {
    std::ptr::copy(src.as_ptr::<u8>(), dst.as_mut_ptr::<u8>(), length)
}

macro_rules! named_arrays {
    ( $( $t:ty => $get:ident, $set:ident );* $(;)? ) => {
        $(
            /// # Safety
            ///
            /// as for `load_array`.
            pub unsafe fn $get(src: Address, dst: &mut [$t], offset: usize, length: usize, swap: bool) {
                load_array::<$t>(src, dst, offset, length, swap)
            }

            /// # Safety
            ///
            /// as for `store_array`.
            pub unsafe fn $set(dst: Address, src: &[$t], offset: usize, length: usize, swap: bool) {
                store_array::<$t>(dst, src, offset, length, swap)
            }
        )*
    };
}

named_arrays! {
    i16 => get_short_array, set_short_array;
    i32 => get_int_array, set_int_array;
    i64 => get_long_array, set_long_array;
    f32 => get_float_array, set_float_array;
    f64 => get_double_array, set_double_array;
}
