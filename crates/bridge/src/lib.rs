pub mod buffer;
pub mod env;
pub mod error;
#[cfg(feature = "c_exports")]
pub mod exports;
pub mod os_memory;
pub mod prelude;
