mod binding_layout;
mod descriptor_counts;
mod descriptor_set;
mod objects;
mod resource;
mod resource_cache;
mod resource_kind;

pub use binding_layout::*;
pub use descriptor_counts::*;
pub use descriptor_set::*;
pub use objects::*;
pub use resource::*;
pub use resource_cache::*;
pub use resource_kind::*;
