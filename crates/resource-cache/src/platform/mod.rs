pub mod ash;
mod null;
mod resource_platform;

pub use null::*;
pub use resource_platform::*;
