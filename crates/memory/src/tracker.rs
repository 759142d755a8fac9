use std::sync::atomic::AtomicIsize;
use std::sync::atomic::Ordering;

pub mod prelude {
    pub use super::AllocationTracker;
    pub use super::LiveBytes;
    pub use super::LiveScope;
    pub use super::NoTracking;
}

/// Hooks the host runtime can use to account for memory allocated outside its own heap.
///
/// `track_allocation` runs before the system allocator is asked for anything and may veto the
/// request, which the caller then sees as running out of memory. `track_free` is told the size
/// recorded in the block's header when it is released.
pub trait AllocationTracker {
    fn track_allocation(&self, size: u64) -> bool;

    fn track_free(&self, size: u64);
}

impl<T: AllocationTracker + ?Sized> AllocationTracker for &T {
    fn track_allocation(&self, size: u64) -> bool {
        (**self).track_allocation(size)
    }

    fn track_free(&self, size: u64) {
        (**self).track_free(size)
    }
}

impl<T: AllocationTracker + ?Sized> AllocationTracker for std::sync::Arc<T> {
    fn track_allocation(&self, size: u64) -> bool {
        (**self).track_allocation(size)
    }

    fn track_free(&self, size: u64) {
        (**self).track_free(size)
    }
}

/// accepts everything and remembers nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTracking;

impl AllocationTracker for NoTracking {
    fn track_allocation(&self, _size: u64) -> bool {
        true
    }

    fn track_free(&self, _size: u64) {}
}

/// Counts the bytes currently handed out to callers, optionally capped.
///
/// Only user visible bytes are counted, never the header.
#[derive(Debug)]
pub struct LiveBytes {
    mem: AtomicIsize,
    limit: Option<isize>,
}

impl LiveBytes {
    pub const fn new() -> Self {
        Self {
            mem: AtomicIsize::new(0),
            limit: None,
        }
    }

    /// rejects any allocation that would take the live total past `limit` bytes
    pub const fn with_limit(limit: isize) -> Self {
        Self {
            mem: AtomicIsize::new(0),
            limit: Some(limit),
        }
    }

    pub fn current(&self) -> isize {
        self.mem.load(Ordering::SeqCst)
    }
}

impl Default for LiveBytes {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationTracker for LiveBytes {
    fn track_allocation(&self, size: u64) -> bool {
        let size = match isize::try_from(size) {
            Ok(size) => size,
            // can never be laid out, an uncapped counter lets the allocator report it
            Err(_) => return self.limit.is_none(),
        };
        match self.limit {
            None => {
                self.mem.fetch_add(size, Ordering::SeqCst);
                true
            }
            Some(limit) => self
                .mem
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                    current.checked_add(size).filter(|next| *next <= limit)
                })
                .is_ok(),
        }
    }

    fn track_free(&self, size: u64) {
        // oversized requests were never counted
        if let Ok(size) = isize::try_from(size) {
            self.mem.fetch_sub(size, Ordering::SeqCst);
        }
    }
}

/// Snapshot of a LiveBytes total that complains on drop if the total moved.
///
/// Build one with `live_scope!` at the top of a block that should leave native memory as it
/// found it.
pub struct LiveScope<'a> {
    tracker: &'a LiveBytes,
    at_start: isize,
    name: &'a str,
    file: &'static str,
    line: u32,
    pub quiet: bool,
}

impl<'a> LiveScope<'a> {
    pub fn new(
        tracker: &'a LiveBytes,
        name: &'a str,
        file: &'static str,
        line: u32,
        quiet: bool,
    ) -> Self {
        Self {
            tracker,
            at_start: tracker.current(),
            name,
            file,
            line,
            quiet,
        }
    }

    pub fn leaked(&self) -> isize {
        self.tracker.current() - self.at_start
    }
}

impl Drop for LiveScope<'_> {
    fn drop(&mut self) {
        let leaked = self.leaked();
        if !self.quiet && leaked != 0 {
            tracing::warn!(
                file = self.file,
                line = self.line,
                scope = self.name,
                leaked,
                "native bytes escaped scope"
            );
        }
    }
}

#[macro_export]
macro_rules! live_scope {
    ($tracker:expr) => {
        $crate::live_scope!($tracker, "", false)
    };

    ($tracker:expr, $name:expr) => {
        $crate::live_scope!($tracker, $name, false)
    };

    ($tracker:expr, $name:expr, $quiet:expr) => {
        $crate::tracker::LiveScope::new($tracker, $name, file!(), line!(), $quiet)
    };
}
