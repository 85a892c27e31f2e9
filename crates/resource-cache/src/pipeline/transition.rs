use crate::descriptor::{BoundObject, RequiredState, ResourceKind, ShaderResourceCache};
use crate::pipeline::{StateMismatch, TransitionContext, TransitionError};
use crate::platform::ResourcePlatform;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TransitionMode {
	/// Only report resources in the wrong state, never change any state or request any transition.
	Verify,
	/// Transition every resource in the wrong state into the state its binding requires.
	Apply,
}

/// What a transition pass did.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TransitionSummary {
	/// Buffer memory barriers requested in apply mode.
	pub barriers: u32,
	/// Image layout transitions requested in apply mode.
	pub layout_transitions: u32,
	/// Mismatches reported in verify mode.
	pub mismatches: u32,
}

impl TransitionSummary {
	pub fn transitions(&self) -> u32 {
		self.barriers + self.layout_transitions
	}

	/// Whether every resource was already in the correct state.
	pub fn is_clean(&self) -> bool {
		self.transitions() == 0 && self.mismatches == 0
	}
}

impl<P: ResourcePlatform> ShaderResourceCache<P> {
	/// Ensures every bound resource is in the state required by the kind of slot it is bound to, see
	/// [`ResourceKind::required_state`]. Run it once after binding and before submitting the draw or dispatch
	/// consuming these resources.
	///
	/// * [`TransitionMode::Verify`]: report every resource in the wrong state to
	///   [`TransitionContext::report_state_mismatch`], without modifying anything.
	/// * [`TransitionMode::Apply`]: request a barrier or layout transition for every resource in the wrong state and
	///   update the state tracked on the resource. A resource bound to multiple slots is only transitioned once.
	///
	/// A resource bound to slots requiring different states, e.g. a buffer used as both uniform and storage buffer,
	/// ends up in the state of the last such slot and is transitioned again on every pass.
	///
	/// Slots are visited in storage order. Fails on the first slot that was never initialized or requires a state
	/// but has nothing bound to it.
	pub fn transition_resources(
		&self,
		mode: TransitionMode,
		ctx: &mut impl TransitionContext<P>,
	) -> Result<TransitionSummary, TransitionError> {
		match mode {
			TransitionMode::Verify => self.transition_resources_with::<true>(ctx),
			TransitionMode::Apply => self.transition_resources_with::<false>(ctx),
		}
	}

	/// [`Self::transition_resources`] with the mode selected at compile time.
	pub fn transition_resources_with<const VERIFY_ONLY: bool>(
		&self,
		ctx: &mut impl TransitionContext<P>,
	) -> Result<TransitionSummary, TransitionError> {
		profiling::function_scope!();
		let mut summary = TransitionSummary::default();
		for (index, resource) in self.resources().iter().enumerate() {
			let Some(kind) = resource.kind() else {
				return Err(TransitionError::UnexpectedResourceKind {
					location: self.locate(index as u32),
				});
			};

			match kind.required_state() {
				RequiredState::None => (),
				RequiredState::Buffer(required) => {
					let buffer = resource
						.object()
						.and_then(BoundObject::buffer)
						.ok_or_else(|| self.unbound(index, kind))?;
					let current = buffer.access();
					if current != required {
						if VERIFY_ONLY {
							summary.mismatches += 1;
							ctx.report_state_mismatch(StateMismatch::Buffer {
								location: self.locate(index as u32),
								name: buffer.name().to_owned(),
								current,
								required,
							});
						} else {
							log::trace!("Buffer \"{}\": {:?} -> {:?}", buffer.name(), current, required);
							ctx.request_memory_barrier(buffer, current, required);
							buffer.set_access(required);
							summary.barriers += 1;
						}
					}
				}
				RequiredState::Image(required) => {
					let texture = resource
						.object()
						.and_then(BoundObject::texture)
						.ok_or_else(|| self.unbound(index, kind))?;
					let current = texture.access();
					if current != required {
						if VERIFY_ONLY {
							summary.mismatches += 1;
							ctx.report_state_mismatch(StateMismatch::Texture {
								location: self.locate(index as u32),
								name: texture.name().to_owned(),
								current,
								required,
							});
						} else {
							log::trace!("Texture \"{}\": {:?} -> {:?}", texture.name(), current, required);
							ctx.request_layout_transition(texture, current, required);
							texture.set_access(required);
							summary.layout_transitions += 1;
						}
					}
				}
			}
		}
		Ok(summary)
	}

	#[cold]
	#[inline(never)]
	fn unbound(&self, index: usize, kind: ResourceKind) -> TransitionError {
		TransitionError::UnboundResource {
			location: self.locate(index as u32),
			kind,
		}
	}
}
