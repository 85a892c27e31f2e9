use crate::descriptor::ShaderResourceCache;
use crate::pipeline::{TransitionContext, TransitionError, TransitionMode, TransitionSummary};
use crate::platform::ResourcePlatform;

bitflags::bitflags! {
	/// Flags controlling what committing shader resources does with the states of the bound resources.
	#[repr(transparent)]
	#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
	pub struct CommitShaderResourcesFlags: u32 {
		/// Transition all bound resources into the states required by their bindings.
		const TRANSITION_RESOURCES = 0b1;
		/// Verify all bound resources are in the states required by their bindings and report any that are not.
		/// Always enabled with debug assertions.
		const VERIFY_STATES = 0b10;
	}
}

impl CommitShaderResourcesFlags {
	/// The transition pass to run on commit, if any. Transitioning takes priority over verifying.
	pub fn transition_mode(self) -> Option<TransitionMode> {
		if self.contains(Self::TRANSITION_RESOURCES) {
			Some(TransitionMode::Apply)
		} else if self.contains(Self::VERIFY_STATES) || cfg!(debug_assertions) {
			Some(TransitionMode::Verify)
		} else {
			None
		}
	}
}

impl<P: ResourcePlatform> ShaderResourceCache<P> {
	/// Commits the bound resources for the next draw or dispatch, running the transition pass selected by `flags`.
	pub fn commit_resources(
		&self,
		flags: CommitShaderResourcesFlags,
		ctx: &mut impl TransitionContext<P>,
	) -> Result<TransitionSummary, TransitionError> {
		match flags.transition_mode() {
			Some(mode) => self.transition_resources(mode, ctx),
			None => Ok(TransitionSummary::default()),
		}
	}
}
