use native_mem::prelude::*;

/// store then load every value at `base + offset` for each offset below the width of `T`,
/// returning the offsets where a value did not come back bit for bit
pub fn round_trip_offsets<T: Scalar>(base: Address, values: &[T]) -> Vec<u64> {
    let mut failed = vec![];
    for offset in 0..T::WIDTH as u64 {
        let address = base.add(offset);
        for value in values {
            let loaded: T = unsafe {
                store(address, *value);
                load(address)
            };
            if value.to_ne_bytes().as_ref() != loaded.to_ne_bytes().as_ref() {
                failed.push(offset);
            }
        }
    }
    failed
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::random_bytes;
    use crate::with_block;
    use rand::Rng;

    fn random<T>(n: usize) -> Vec<T>
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        let mut rng = rand::thread_rng();
        (0..n).map(|_| rng.gen()).collect()
    }

    #[test]
    fn round_trip_every_width_test() {
        with_block(64, |base| {
            // allocations are header aligned so base + 8 is aligned for every width
            let base = base.add(8);
            assert!(base.is_aligned(8));

            assert!(round_trip_offsets(base, &random::<i8>(32)).is_empty());
            assert!(round_trip_offsets(base, &random::<i16>(32)).is_empty());
            assert!(round_trip_offsets(base, &random::<i32>(32)).is_empty());
            assert!(round_trip_offsets(base, &random::<i64>(32)).is_empty());

            let floats: Vec<f32> = random::<u32>(32).into_iter().map(f32::from_bits).collect();
            let doubles: Vec<f64> = random::<u64>(32).into_iter().map(f64::from_bits).collect();
            assert!(round_trip_offsets(base, &floats).is_empty());
            assert!(round_trip_offsets(base, &doubles).is_empty());

            let edges = [i64::MIN, -1, 0, 1, i64::MAX];
            assert!(round_trip_offsets(base, &edges).is_empty());
        });
    }

    #[test]
    fn unaligned_neighbours_untouched_test() {
        with_block(16, |base| unsafe {
            memset(base, 0xee, 16);
            set_double(base.add(3), 0.0);
            let mut bytes = [0_u8; 16];
            load_byte_array(base, &mut bytes, 0, 16);
            assert_eq!([0xee, 0xee, 0xee], bytes[0..3]);
            assert_eq!([0; 8], bytes[3..11]);
            assert!(bytes[11..].iter().all(|b| *b == 0xee));
        });
    }

    #[test]
    fn byte_array_fidelity_test() {
        for len in [0, 1, 4096] {
            let input = random_bytes(len);
            let output = with_block(len, |address| {
                let mut output = vec![0_u8; len];
                unsafe {
                    store_byte_array(address, &input, 0, len);
                    load_byte_array(address, &mut output, 0, len);
                }
                output
            });
            assert_eq!(input, output, "len {}", len);
        }
    }

    #[test]
    fn swapped_int_array_test() {
        let input = [0x0102_0304_i32, 0x0a0b_0c0d, -2, i32::MIN];
        with_block(16, |address| {
            let mut raw = [0_u8; 16];
            let mut restored = [0_i32; 4];
            unsafe {
                set_int_array(address, &input, 0, 4, true);
                load_byte_array(address, &mut raw, 0, 16);
                get_int_array(address, &mut restored, 0, 4, true);
            }
            let expected: Vec<u8> = input
                .iter()
                .flat_map(|v| {
                    let mut b = v.to_ne_bytes();
                    b.reverse();
                    b
                })
                .collect();
            assert_eq!(expected, raw.to_vec());
            assert_eq!(input, restored);
        });
    }

    #[test]
    fn swapped_short_runs_test() {
        for count in [0_usize, 1, 2, 3, 100, 101] {
            let input = random::<i16>(count);
            with_block(count * 2 + 1, |base| {
                // odd address so the paired 32 bit swaps run misaligned
                let address = base.add(1);
                let mut raw = vec![0_i16; count];
                unsafe {
                    set_short_array(address, &input, 0, count, true);
                    get_short_array(address, &mut raw, 0, count, false);
                }
                let expected: Vec<i16> = input.iter().map(|v| v.swap_bytes()).collect();
                assert_eq!(expected, raw, "count {}", count);
            });
        }
    }

    #[test]
    fn big_endian_wire_test() {
        // storing with the swap flag on a little endian host gives big endian bytes
        let order = ByteOrder::BigEndian;
        with_block(8, |address| {
            let mut raw = [0_u8; 8];
            unsafe {
                set_short_array(address, &[0x0102_i16, 0x0304], 0, 2, order.needs_swap());
                set_int_array(address.add(4), &[0x0506_0708_i32], 0, 1, order.needs_swap());
                load_byte_array(address, &mut raw, 0, 8);
            }
            assert_eq!([1, 2, 3, 4, 5, 6, 7, 8], raw);
        });
    }

    #[test]
    fn allocation_lifecycle_test() {
        let live = LiveBytes::new();
        let zero = allocate_tracked(0, &live).unwrap();
        let other = allocate_tracked(32, &live).unwrap();
        assert_ne!(zero, other);
        assert!(!zero.is_null());

        unsafe {
            memset(other, 0x11, 32);
            deallocate_tracked(zero, &live);
            let mut bytes = [0_u8; 32];
            load_byte_array(other, &mut bytes, 0, 32);
            assert_eq!([0x11; 32], bytes);
            assert_eq!(32, allocation_size(other));
            deallocate_tracked(other, &live);
        }
        assert_eq!(0, live.current());
    }

    #[test]
    fn many_live_allocations_are_distinct_test() {
        let live = LiveBytes::new();
        let _scope = native_mem::live_scope!(&live, "many_live_allocations_are_distinct_test");
        let mut rng = rand::thread_rng();
        let blocks: Vec<(Address, u8)> = (0..64)
            .map(|i| {
                let size = rng.gen_range(0..48);
                let address = allocate_tracked(size, &live).unwrap();
                unsafe { memset(address, i as u8, size as usize) };
                (address, i as u8)
            })
            .collect();

        let mut addresses: Vec<Address> = blocks.iter().map(|(a, _)| *a).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(blocks.len(), addresses.len());

        for (address, fill) in blocks {
            unsafe {
                let size = allocation_size(address) as usize;
                let mut bytes = vec![0_u8; size];
                load_byte_array(address, &mut bytes, 0, size);
                assert!(bytes.iter().all(|b| *b == fill));
                deallocate_tracked(address, &live);
            }
        }
        assert_eq!(0, live.current());
    }

    #[test]
    fn memmove_overlap_test() {
        for (dst, src, len) in [(5, 0, 20), (0, 5, 20), (1, 0, 31), (0, 1, 31)] {
            let original = random_bytes(32);
            let mut expected = original.clone();
            let tmp = expected[src..src + len].to_vec();
            expected[dst..dst + len].copy_from_slice(&tmp);

            let moved = with_block(32, |address| {
                let mut out = vec![0_u8; 32];
                unsafe {
                    store_byte_array(address, &original, 0, 32);
                    memmove(address.add(dst as u64), address.add(src as u64), len);
                    load_byte_array(address, &mut out, 0, 32);
                }
                out
            });
            assert_eq!(expected, moved, "dst {} src {} len {}", dst, src, len);
        }
    }
}
