//! Vulkan platform using [`ash`], recording transitions as synchronization2 pipeline barriers.

mod barrier;
mod convert;
mod platform;

pub use barrier::*;
pub use convert::*;
pub use platform::*;
