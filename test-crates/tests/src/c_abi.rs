use native_mem_bridge::exports::*;

/// run `f` against a fresh C allocation of `len` bytes and free it afterwards
pub fn with_c_block<R>(len: i64, f: impl FnOnce(i64) -> R) -> R {
    let address = native_mem_malloc(len);
    assert_ne!(0, address, "native_mem_malloc({}) failed", len);
    let r = f(address);
    unsafe { native_mem_free(address) };
    r
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::SERIAL;
    use native_mem_bridge::prelude::*;

    #[test]
    fn live_bytes_balance_test() {
        let _serial = SERIAL.lock();
        let before = native_mem_live_bytes();
        let a = native_mem_malloc(100);
        let b = native_mem_malloc(0);
        assert_eq!(before + 100, native_mem_live_bytes());
        unsafe {
            native_mem_free(b);
            native_mem_free(a);
            native_mem_free(0);
        }
        assert_eq!(before, native_mem_live_bytes());
        assert_eq!(ErrorCode::None as i32, native_mem_take_error());
    }

    #[test]
    fn out_of_memory_sentinel_test() {
        let _serial = SERIAL.lock();
        let before = native_mem_live_bytes();
        assert_eq!(0, native_mem_malloc(i64::MAX));
        assert_eq!(ErrorCode::OutOfMemory as i32, native_mem_take_error());
        assert_eq!(before, native_mem_live_bytes());
    }

    #[test]
    fn scalars_test() {
        let _serial = SERIAL.lock();
        with_c_block(16, |address| unsafe {
            native_mem_set_byte(address, -1);
            assert_eq!(-1, native_mem_get_byte(address));
            native_mem_set_short(address + 1, 0x1234);
            assert_eq!(0x1234, native_mem_get_short(address + 1));
            native_mem_set_int(address + 3, -123_456);
            assert_eq!(-123_456, native_mem_get_int(address + 3));
            native_mem_set_long(address + 5, i64::MIN + 7);
            assert_eq!(i64::MIN + 7, native_mem_get_long(address + 5));
            native_mem_set_float(address + 1, -0.5);
            assert_eq!(-0.5, native_mem_get_float(address + 1));
            native_mem_set_double(address + 7, 6.02e23);
            assert_eq!(6.02e23, native_mem_get_double(address + 7));
        });
    }

    #[test]
    fn arrays_test() {
        let _serial = SERIAL.lock();
        with_c_block(64, |address| unsafe {
            let shorts = [1_i16, -2, 3];
            let mut shorts_out = [0_i16; 3];
            native_mem_set_short_array(address, shorts.as_ptr(), 3, 0, 3, true);
            native_mem_get_short_array(address, shorts_out.as_mut_ptr(), 3, 0, 3, true);
            assert_eq!(shorts, shorts_out);
            assert_eq!(1_i16.swap_bytes(), native_mem_get_short(address));

            let floats = [1.25_f32, f32::MIN_POSITIVE];
            let mut floats_out = [0_f32; 2];
            native_mem_set_float_array(address, floats.as_ptr(), 2, 0, 2, false);
            native_mem_get_float_array(address, floats_out.as_mut_ptr(), 2, 0, 2, false);
            assert_eq!(floats, floats_out);

            let longs = [i64::MAX, 3];
            let mut doubles_out = [0_f64; 2];
            native_mem_set_long_array(address, longs.as_ptr(), 2, 0, 2, false);
            native_mem_get_double_array(address, doubles_out.as_mut_ptr(), 2, 0, 2, false);
            assert_eq!(longs[1], doubles_out[1].to_bits() as i64);

            let doubles = [0.5_f64];
            let mut longs_out = [0_i64; 1];
            native_mem_set_double_array(address, doubles.as_ptr(), 1, 0, 1, true);
            native_mem_get_long_array(address, longs_out.as_mut_ptr(), 1, 0, 1, true);
            assert_eq!(0.5_f64.to_bits() as i64, longs_out[0]);

            let bytes = [9_i8, 8, 7, 6];
            let mut bytes_out = [0_i8; 4];
            native_mem_set_byte_array(address, bytes.as_ptr(), 4, 0, 4);
            native_mem_memmove(address + 1, address, 3);
            native_mem_get_byte_array(address, bytes_out.as_mut_ptr(), 4, 0, 4);
            assert_eq!([9, 9, 8, 7], bytes_out);

            native_mem_memset(address, 0x22, 64);
            assert_eq!(0x2222_2222, native_mem_get_int(address + 60));
        });
        assert_eq!(ErrorCode::None as i32, native_mem_take_error());
    }

    #[test]
    fn bad_array_range_test() {
        let _serial = SERIAL.lock();
        with_c_block(8, |address| unsafe {
            let ints = [1_i32, 2];
            native_mem_set_int(address, 77);
            native_mem_set_int_array(address, ints.as_ptr(), 2, 1, 2, false);
            assert_eq!(ErrorCode::OutOfBounds as i32, native_mem_take_error());
            native_mem_set_int_array(address, ints.as_ptr(), 2, 0, -1, false);
            assert_eq!(ErrorCode::NegativeLength as i32, native_mem_take_error());
            assert_eq!(77, native_mem_get_int(address));
        });
    }

    #[test]
    fn direct_buffer_test() {
        let live = std::sync::Arc::new(LiveBytes::new());
        {
            let mut buffer = DirectBuffer::allocate_tracked(12, live.clone()).unwrap();
            buffer.put(0, 0x0102_i16).unwrap().put(2, 0x0304_0506_i32).unwrap();
            assert_eq!(&[1, 2, 3, 4, 5, 6], &buffer.as_slice()[..6]);

            buffer.set_order(ByteOrder::LittleEndian);
            buffer.put_slice(6, &[0x0a0b_i16, 0x0c0d, 0x0e0f]).unwrap();
            assert_eq!(&[0x0b, 0x0a, 0x0d, 0x0c, 0x0f, 0x0e], &buffer.as_slice()[6..]);
            assert_eq!(12, live.current());
        }
        assert_eq!(0, live.current());
    }
}
