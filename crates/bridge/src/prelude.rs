pub use crate::buffer::DirectBuffer;
pub use crate::env::take_pending_error;
pub use crate::env::HostEnv;
pub use crate::env::PendingError;
pub use crate::error::ErrorCode;
pub use crate::os_memory::OsMemory;
pub use native_mem::prelude::*;
