mod access_state;
mod access_type;
mod commit;
mod transition;
mod transition_context;
mod transition_error;

pub use access_state::*;
pub use access_type::*;
pub use commit::*;
pub use transition::*;
pub use transition_context::*;
pub use transition_error::*;
