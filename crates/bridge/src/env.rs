use crate::prelude::*;
use std::cell::RefCell;

/// The managed caller's side of error signalling.
///
/// The primitives never unwind into the caller. When something the caller can observe goes
/// wrong the bridge throws it here and hands back a sentinel, the environment decides how the
/// caller finds out.
pub trait HostEnv {
    fn throw(&self, error: MemoryError);
}

impl<F: Fn(MemoryError)> HostEnv for F {
    fn throw(&self, error: MemoryError) {
        self(error)
    }
}

thread_local! {
    static PENDING: RefCell<Option<MemoryError>> = const { RefCell::new(None) };
}

/// Parks the last thrown error in a thread local slot until the caller asks for it.
///
/// Like a pending exception, a newer error replaces an older one that was never collected.
#[derive(Clone, Copy, Debug, Default)]
pub struct PendingError;

impl HostEnv for PendingError {
    fn throw(&self, error: MemoryError) {
        tracing::debug!(%error, "error pending for host");
        PENDING.with(|pending| *pending.borrow_mut() = Some(error));
    }
}

/// collect and clear the error thrown on this thread, if any
pub fn take_pending_error() -> Option<MemoryError> {
    PENDING.with(|pending| pending.borrow_mut().take())
}
