//! Byte order reversal for single words and for runs of words in a byte buffer.
//!
//! The run functions operate on the first `count` words of `buffer` in place and make no
//! alignment assumption about where the buffer starts. Panics if `buffer` is shorter than
//! `count` words.

#[cfg(test)]
thread_local! {
    /// calls into the fuzz instrumented word swaps on this thread
    static WORD_CALLS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

#[inline(always)]
fn word_call() {
    #[cfg(test)]
    WORD_CALLS.with(|calls| calls.set(calls.get() + 1));
}

/// single word entry points, instrumented for fuzzing
/// every call records a corpus entry under `fuzzing`, so nothing that loops goes through these
#[cfg_attr(feature = "fuzzing", test_fuzz::test_fuzz)]
pub fn swap16(word: u16) -> u16 {
    word_call();
    word.swap_bytes()
}

#[cfg_attr(feature = "fuzzing", test_fuzz::test_fuzz)]
pub fn swap32(word: u32) -> u32 {
    word_call();
    word.swap_bytes()
}

#[cfg_attr(feature = "fuzzing", test_fuzz::test_fuzz)]
pub fn swap64(word: u64) -> u64 {
    word_call();
    word.swap_bytes()
}

/// reverse the bytes of `count` 16 bit words in place
///
/// adjacent words are handled two at a time as a single 32 bit unit: reversing ABCD gives DCBA
/// and rotating the halves gives BADC, which is both words swapped and still in slot order.
/// an odd trailing word gets a plain 16 bit swap.
pub fn swap_run_16(buffer: &mut [u8], count: usize) {
    let run = &mut buffer[..count * 2];
    let mut pairs = run.chunks_exact_mut(4);
    for pair in &mut pairs {
        let v = u32::from_ne_bytes([pair[0], pair[1], pair[2], pair[3]]).swap_bytes();
        pair.copy_from_slice(&v.rotate_left(16).to_ne_bytes());
    }
    let last = pairs.into_remainder();
    if !last.is_empty() {
        let v = u16::from_ne_bytes([last[0], last[1]]).swap_bytes();
        last.copy_from_slice(&v.to_ne_bytes());
    }
}

/// reverse the bytes of each of `count` 32 bit words in place
pub fn swap_run_32(buffer: &mut [u8], count: usize) {
    for word in buffer[..count * 4].chunks_exact_mut(4) {
        let v = u32::from_ne_bytes([word[0], word[1], word[2], word[3]]).swap_bytes();
        word.copy_from_slice(&v.to_ne_bytes());
    }
}

/// reverse the bytes of each of `count` 64 bit words in place
pub fn swap_run_64(buffer: &mut [u8], count: usize) {
    for word in buffer[..count * 8].chunks_exact_mut(8) {
        let mut bytes = [0_u8; 8];
        bytes.copy_from_slice(word);
        word.copy_from_slice(&u64::from_ne_bytes(bytes).swap_bytes().to_ne_bytes());
    }
}

/// dispatch to the run swap matching a word width of 2, 4 or 8 bytes
/// anything narrower has no byte order and is left alone
pub fn swap_run(buffer: &mut [u8], width: usize, count: usize) {
    match width {
        2 => swap_run_16(buffer, count),
        4 => swap_run_32(buffer, count),
        8 => swap_run_64(buffer, count),
        _ => {}
    }
}
