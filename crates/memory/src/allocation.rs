use crate::tracker::AllocationTracker;
use crate::tracker::NoTracking;
use native_mem_common::*;
use std::alloc::Layout;

/// The record tucked in front of every block handed out by `allocate`.
///
/// Nothing outside this module knows it exists. Callers only ever see the address immediately
/// after it.
#[repr(C)]
struct Header {
    size: Len,
}

pub const HEADER_BYTES: usize = std::mem::size_of::<Header>();

fn layout_for(size: Len) -> MemoryResult<Layout> {
    let total = usize::try_from(size)
        .ok()
        .and_then(|size| size.checked_add(HEADER_BYTES))
        .ok_or(MemoryError::OutOfMemory { size })?;
    Layout::from_size_align(total, std::mem::align_of::<Header>())
        .map_err(|_| MemoryError::OutOfMemory { size })
}

/// allocate `size` bytes of native memory that nothing will reclaim automatically
///
/// the returned address is the first byte after a size header. pass it back to `deallocate`
/// exactly once. a zero size still allocates the header, so every live allocation gets its own
/// distinct address.
pub fn allocate(size: Len) -> MemoryResult<Address> {
    allocate_tracked(size, &NoTracking)
}

/// allocate with a tracker that can veto the request and gets told about the bytes
pub fn allocate_tracked<T: AllocationTracker + ?Sized>(
    size: Len,
    tracker: &T,
) -> MemoryResult<Address> {
    if !tracker.track_allocation(size) {
        tracing::warn!(size, "external allocation was rejected");
        return Err(MemoryError::TrackerRejected { size });
    }

    let block = layout_for(size).map(|layout| {
        // SAFETY: the layout always includes the header so it is never zero sized.
        unsafe { std::alloc::alloc(layout) }
    });
    let block = match block {
        Ok(block) if !block.is_null() => block,
        _ => {
            tracker.track_free(size);
            tracing::error!(size, "native allocation failed");
            return Err(MemoryError::OutOfMemory { size });
        }
    };

    // SAFETY: block is fresh, non null and aligned for Header.
    unsafe { block.cast::<Header>().write(Header { size }) };
    let address = Address::from_ptr(block).add(HEADER_BYTES as Len);

    #[cfg(feature = "debug_memory")]
    tracing::debug!(%address, header = %Address::from_ptr(block), size, "allocate");
    #[cfg(not(feature = "debug_memory"))]
    tracing::trace!(%address, size, "allocate");

    Ok(address)
}

/// the size that was requested when `address` was allocated
///
/// # Safety
///
/// `address` must have come from `allocate` and not been deallocated yet.
pub unsafe fn allocation_size(address: Address) -> Len {
    address.sub(HEADER_BYTES as Len).as_ptr::<Header>().read().size
}

/// release a block previously returned by `allocate`
///
/// the null address is ignored.
///
/// # Safety
///
/// `address` must be null or have come from `allocate` and not been deallocated yet.
/// nothing here can tell the difference, anything else is undefined behaviour.
pub unsafe fn deallocate(address: Address) {
    deallocate_tracked(address, &NoTracking)
}

/// release a block and tell the tracker how many bytes went with it
///
/// # Safety
///
/// as for `deallocate`.
pub unsafe fn deallocate_tracked<T: AllocationTracker + ?Sized>(address: Address, tracker: &T) {
    if address.is_null() {
        return;
    }
    let header = address.sub(HEADER_BYTES as Len);
    let size = header.as_ptr::<Header>().read().size;

    #[cfg(feature = "debug_memory")]
    tracing::debug!(%address, %header, size, "deallocate");
    #[cfg(not(feature = "debug_memory"))]
    tracing::trace!(%address, size, "deallocate");

    // SAFETY: the same size and alignment produced a valid layout when the block was allocated.
    let layout = Layout::from_size_align_unchecked(
        size as usize + HEADER_BYTES,
        std::mem::align_of::<Header>(),
    );
    std::alloc::dealloc(header.as_mut_ptr::<u8>(), layout);
    tracker.track_free(size);
}
