pub mod access;
pub mod allocation;
pub mod bulk;
pub mod tracker;

pub use native_mem_common::*;

#[deny(ambiguous_glob_reexports)]
pub mod prelude {
    pub use crate::access::get_byte;
    pub use crate::access::get_double;
    pub use crate::access::get_float;
    pub use crate::access::get_int;
    pub use crate::access::get_long;
    pub use crate::access::get_short;
    pub use crate::access::load;
    pub use crate::access::load_ordered;
    pub use crate::access::set_byte;
    pub use crate::access::set_double;
    pub use crate::access::set_float;
    pub use crate::access::set_int;
    pub use crate::access::set_long;
    pub use crate::access::set_short;
    pub use crate::access::store;
    pub use crate::access::store_ordered;
    pub use crate::allocation::allocate;
    pub use crate::allocation::allocate_tracked;
    pub use crate::allocation::allocation_size;
    pub use crate::allocation::deallocate;
    pub use crate::allocation::deallocate_tracked;
    pub use crate::bulk::get_double_array;
    pub use crate::bulk::get_float_array;
    pub use crate::bulk::get_int_array;
    pub use crate::bulk::get_long_array;
    pub use crate::bulk::get_short_array;
    pub use crate::bulk::load_array;
    pub use crate::bulk::load_byte_array;
    pub use crate::bulk::memmove;
    pub use crate::bulk::memset;
    pub use crate::bulk::set_double_array;
    pub use crate::bulk::set_float_array;
    pub use crate::bulk::set_int_array;
    pub use crate::bulk::set_long_array;
    pub use crate::bulk::set_short_array;
    pub use crate::bulk::store_array;
    pub use crate::bulk::store_byte_array;
    pub use crate::tracker::prelude::*;
    pub use native_mem_common::*;
}
