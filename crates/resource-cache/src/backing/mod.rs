//! Backing memory of the shader resource cache: the allocator capability and the raw blocks it hands out.

mod allocator;

pub use allocator::*;
