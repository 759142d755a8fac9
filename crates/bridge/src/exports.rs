//! The C entry points.
//!
//! Every call goes through one process wide `OsMemory` whose errors are parked per thread until
//! the host collects them with `native_mem_take_error`. Managed arrays cross as a pointer plus
//! their element count and must stay pinned for the duration of the call.

use crate::env::take_pending_error;
use crate::env::PendingError;
use crate::error::ErrorCode;
use crate::os_memory::OsMemory;
use crate::prelude::*;

pub static OS_MEMORY: OsMemory<PendingError, LiveBytes> =
    OsMemory::new(PendingError, LiveBytes::new());

/// the pinned managed array behind `ptr`, empty for a null pointer or a non positive count
unsafe fn managed<'a, T>(ptr: *const T, count: i32) -> &'a [T] {
    match usize::try_from(count) {
        Ok(count) if count > 0 && !ptr.is_null() => std::slice::from_raw_parts(ptr, count),
        _ => &[],
    }
}

unsafe fn managed_mut<'a, T>(ptr: *mut T, count: i32) -> &'a mut [T] {
    match usize::try_from(count) {
        Ok(count) if count > 0 && !ptr.is_null() => std::slice::from_raw_parts_mut(ptr, count),
        _ => &mut [],
    }
}

#[no_mangle]
pub extern "C" fn native_mem_malloc(size: i64) -> i64 {
    OS_MEMORY.malloc(size)
}

#[no_mangle]
pub unsafe extern "C" fn native_mem_free(address: i64) {
    OS_MEMORY.free(address)
}

#[no_mangle]
pub unsafe extern "C" fn native_mem_memset(address: i64, value: i8, length: i64) {
    OS_MEMORY.memset(address, value, length)
}

#[no_mangle]
pub unsafe extern "C" fn native_mem_memmove(dst: i64, src: i64, length: i64) {
    OS_MEMORY.memmove(dst, src, length)
}

/// collect the error thrown on this thread by the last failing call, as an ErrorCode
#[no_mangle]
pub extern "C" fn native_mem_take_error() -> i32 {
    ErrorCode::from(take_pending_error()) as i32
}

/// bytes currently allocated through `native_mem_malloc` and not yet freed
#[no_mangle]
pub extern "C" fn native_mem_live_bytes() -> i64 {
    OS_MEMORY.tracker().current() as i64
}

macro_rules! scalar_exports {
    ( $( $t:ty => $get:ident, $set:ident, $c_get:ident, $c_set:ident );* $(;)? ) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $c_get(address: i64) -> $t {
                OS_MEMORY.$get(address)
            }

            #[no_mangle]
            pub unsafe extern "C" fn $c_set(address: i64, value: $t) {
                OS_MEMORY.$set(address, value)
            }
        )*
    };
}

scalar_exports! {
    i8 => get_byte, set_byte, native_mem_get_byte, native_mem_set_byte;
    i16 => get_short, set_short, native_mem_get_short, native_mem_set_short;
    i32 => get_int, set_int, native_mem_get_int, native_mem_set_int;
    i64 => get_long, set_long, native_mem_get_long, native_mem_set_long;
    f32 => get_float, set_float, native_mem_get_float, native_mem_set_float;
    f64 => get_double, set_double, native_mem_get_double, native_mem_set_double;
}

#[no_mangle]
pub unsafe extern "C" fn native_mem_get_byte_array(
    address: i64,
    dst: *mut i8,
    dst_count: i32,
    offset: i32,
    length: i32,
) {
    OS_MEMORY.get_byte_array(address, managed_mut(dst, dst_count), offset, length)
}

#[no_mangle]
pub unsafe extern "C" fn native_mem_set_byte_array(
    address: i64,
    src: *const i8,
    src_count: i32,
    offset: i32,
    length: i32,
) {
    OS_MEMORY.set_byte_array(address, managed(src, src_count), offset, length)
}

macro_rules! array_exports {
    ( $( $t:ty => $get:ident, $set:ident, $c_get:ident, $c_set:ident );* $(;)? ) => {
        $(
            #[no_mangle]
            pub unsafe extern "C" fn $c_get(
                address: i64,
                dst: *mut $t,
                dst_count: i32,
                offset: i32,
                length: i32,
                swap: bool,
            ) {
                OS_MEMORY.$get(address, managed_mut(dst, dst_count), offset, length, swap)
            }

            #[no_mangle]
            pub unsafe extern "C" fn $c_set(
                address: i64,
                src: *const $t,
                src_count: i32,
                offset: i32,
                length: i32,
                swap: bool,
            ) {
                OS_MEMORY.$set(address, managed(src, src_count), offset, length, swap)
            }
        )*
    };
}

array_exports! {
    i16 => get_short_array, set_short_array, native_mem_get_short_array, native_mem_set_short_array;
    i32 => get_int_array, set_int_array, native_mem_get_int_array, native_mem_set_int_array;
    i64 => get_long_array, set_long_array, native_mem_get_long_array, native_mem_set_long_array;
    f32 => get_float_array, set_float_array, native_mem_get_float_array, native_mem_set_float_array;
    f64 => get_double_array, set_double_array, native_mem_get_double_array, native_mem_set_double_array;
}
