use crate::descriptor::{ResourceKind, ResourceLocation};
use thiserror::Error;

/// A fatal error aborting a transition pass. Both variants indicate that the cache was not set up or bound correctly,
/// and should usually be handled with a `panic!` (or [`Result::unwrap`]).
#[derive(Error)]
#[non_exhaustive]
pub enum TransitionError {
	#[error("Resource {location} has an unexpected resource kind, it was never initialized by shader reflection")]
	UnexpectedResourceKind { location: ResourceLocation },
	#[error("{kind:?} resource {location} has no object bound to it")]
	UnboundResource {
		location: ResourceLocation,
		kind: ResourceKind,
	},
}

impl core::fmt::Debug for TransitionError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		core::fmt::Display::fmt(self, f)
	}
}
