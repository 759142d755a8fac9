use crate::prelude::*;
use native_mem::access;
use native_mem::allocation;
use native_mem::bulk;
use std::sync::Arc;

/// bytes shown by the Debug impl before it gives up
const DEBUG_BYTES: usize = 32;

pub type SharedTracker = Arc<dyn AllocationTracker + Send + Sync>;

/// An owned block of native memory with a byte order and checked indexing.
///
/// This is what a managed direct byte buffer looks like from the native side. Every access is
/// bounds checked against the capacity before it reaches the raw primitives, multi byte values
/// are read and written in the buffer's order, and the block is released on drop.
pub struct DirectBuffer {
    address: Address,
    capacity: usize,
    order: ByteOrder,
    tracker: Option<SharedTracker>,
}

// SAFETY: the block is owned exclusively by the buffer and only mutated through &mut self.
unsafe impl Send for DirectBuffer {}
unsafe impl Sync for DirectBuffer {}

impl DirectBuffer {
    /// a zeroed buffer of `capacity` bytes in the default (big endian) order
    pub fn allocate(capacity: usize) -> MemoryResult<Self> {
        Self::build(capacity, None)
    }

    /// as `allocate` but accounted for by `tracker`
    pub fn allocate_tracked(capacity: usize, tracker: SharedTracker) -> MemoryResult<Self> {
        Self::build(capacity, Some(tracker))
    }

    fn build(capacity: usize, tracker: Option<SharedTracker>) -> MemoryResult<Self> {
        let size = u64::try_from(capacity)?;
        let address = match &tracker {
            Some(tracker) => allocation::allocate_tracked(size, &**tracker)?,
            None => allocation::allocate(size)?,
        };
        // SAFETY: freshly allocated with exactly `capacity` bytes.
        unsafe { bulk::memset(address, 0, capacity) };
        Ok(Self {
            address,
            capacity,
            order: ByteOrder::default(),
            tracker,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn set_order(&mut self, order: ByteOrder) -> &mut Self {
        self.order = order;
        self
    }

    /// the address of `len` bytes at `index`, if they all fit
    fn at(&self, index: usize, len: usize) -> MemoryResult<Address> {
        match index.checked_add(len) {
            Some(end) if end <= self.capacity => Ok(self.address.add(index as u64)),
            _ => Err(MemoryError::OutOfBounds {
                index: index as u64,
                len: len as u64,
                capacity: self.capacity as u64,
            }),
        }
    }

    fn span<T: Scalar>(len: usize) -> MemoryResult<usize> {
        len.checked_mul(T::WIDTH).ok_or(MemoryError::PointerMap)
    }

    pub fn get<T: Scalar>(&self, index: usize) -> MemoryResult<T> {
        let address = self.at(index, T::WIDTH)?;
        // SAFETY: bounds checked above, the block is live for as long as self.
        Ok(unsafe { access::load_ordered(address, self.order) })
    }

    pub fn put<T: Scalar>(&mut self, index: usize, value: T) -> MemoryResult<&mut Self> {
        let address = self.at(index, T::WIDTH)?;
        // SAFETY: bounds checked above, &mut self means nobody else is looking.
        unsafe { access::store_ordered(address, value, self.order) };
        Ok(self)
    }

    /// write every element of `src` starting at byte `index`, in the buffer's order
    pub fn put_slice<T: Scalar>(&mut self, index: usize, src: &[T]) -> MemoryResult<&mut Self> {
        let address = self.at(index, Self::span::<T>(src.len())?)?;
        // SAFETY: bounds checked above and src cannot alias memory we own exclusively.
        unsafe { bulk::store_array(address, src, 0, src.len(), self.order.needs_swap()) };
        Ok(self)
    }

    /// fill `dst` from byte `index` onwards, in the buffer's order
    pub fn get_slice<T: Scalar>(&self, index: usize, dst: &mut [T]) -> MemoryResult<()> {
        let address = self.at(index, Self::span::<T>(dst.len())?)?;
        let len = dst.len();
        // SAFETY: bounds checked above.
        unsafe { bulk::load_array(address, dst, 0, len, self.order.needs_swap()) };
        Ok(())
    }

    pub fn put_bytes(&mut self, index: usize, src: &[u8]) -> MemoryResult<&mut Self> {
        let address = self.at(index, src.len())?;
        // SAFETY: bounds checked above.
        unsafe { bulk::store_byte_array(address, src, 0, src.len()) };
        Ok(self)
    }

    pub fn get_bytes(&self, index: usize, dst: &mut [u8]) -> MemoryResult<()> {
        let address = self.at(index, dst.len())?;
        let len = dst.len();
        // SAFETY: bounds checked above.
        unsafe { bulk::load_byte_array(address, dst, 0, len) };
        Ok(())
    }

    pub fn fill(&mut self, value: u8) -> &mut Self {
        // SAFETY: the whole block is ours.
        unsafe { bulk::memset(self.address, value, self.capacity) };
        self
    }

    /// move `len` bytes from `src` to `dst` within the buffer, overlap allowed
    pub fn copy_within(&mut self, src: usize, dst: usize, len: usize) -> MemoryResult<&mut Self> {
        let from = self.at(src, len)?;
        let to = self.at(dst, len)?;
        // SAFETY: both ranges bounds checked above.
        unsafe { bulk::memmove(to, from, len) };
        Ok(self)
    }

    /// discard the first `position` bytes, sliding the rest down to index 0
    /// returns the number of bytes that moved
    pub fn compact(&mut self, position: usize) -> MemoryResult<usize> {
        let remaining = self
            .capacity
            .checked_sub(position)
            .ok_or(MemoryError::OutOfBounds {
                index: position as u64,
                len: 0,
                capacity: self.capacity as u64,
            })?;
        self.copy_within(position, 0, remaining)?;
        Ok(remaining)
    }

    pub fn as_slice(&self) -> &[u8] {
        if self.capacity == 0 {
            return &[];
        }
        // SAFETY: the block holds capacity initialized bytes for as long as self lives.
        unsafe { std::slice::from_raw_parts(self.address.as_ptr::<u8>(), self.capacity) }
    }

    /// copy the contents out into an immutable, cheaply cloneable snapshot
    pub fn to_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::copy_from_slice(self.as_slice())
    }
}

impl Drop for DirectBuffer {
    fn drop(&mut self) {
        // SAFETY: the address came from allocate and is released exactly once, here.
        unsafe {
            match &self.tracker {
                Some(tracker) => allocation::deallocate_tracked(self.address, &**tracker),
                None => allocation::deallocate(self.address),
            }
        }
    }
}

impl std::fmt::Debug for DirectBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = &self.as_slice()[..self.capacity.min(DEBUG_BYTES)];
        f.debug_struct("DirectBuffer")
            .field("address", &format_args!("{}", self.address))
            .field("capacity", &self.capacity)
            .field("order", &self.order)
            .field(
                "bytes",
                &format_args!(
                    "{}{}",
                    hex::encode(shown),
                    if self.capacity > DEBUG_BYTES { ".." } else { "" }
                ),
            )
            .finish()
    }
}
