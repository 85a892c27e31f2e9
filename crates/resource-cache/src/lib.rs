pub mod backing;
pub mod descriptor;
pub mod pipeline;
pub mod platform;
