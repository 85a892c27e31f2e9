use crate::descriptor::{Buffer, ResourceLocation, Texture};
use crate::pipeline::{BufferAccess, ImageAccess};
use crate::platform::ResourcePlatform;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// The command recording side of a transition pass.
///
/// In apply mode the pass requests barriers and layout transitions from the context, in verify mode it only reports
/// the resources that are in the wrong state. The pass itself updates the state tracked on the resources, the
/// context only has to record the commands.
pub trait TransitionContext<P: ResourcePlatform> {
	/// Record a memory barrier transitioning `buffer` from `src` to `dst` access.
	fn request_memory_barrier(&mut self, buffer: &Arc<Buffer<P>>, src: BufferAccess, dst: BufferAccess);

	/// Record a layout transition of `texture` from `src` to `dst` access.
	fn request_layout_transition(&mut self, texture: &Arc<Texture<P>>, src: ImageAccess, dst: ImageAccess);

	/// Report a resource that is not in the state its binding requires. Logs an error by default.
	fn report_state_mismatch(&mut self, mismatch: StateMismatch) {
		log::error!("{}", mismatch);
	}
}

/// A bound resource found in the wrong state by a verifying transition pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StateMismatch {
	Buffer {
		location: ResourceLocation,
		name: String,
		current: BufferAccess,
		required: BufferAccess,
	},
	Texture {
		location: ResourceLocation,
		name: String,
		current: ImageAccess,
		required: ImageAccess,
	},
}

impl StateMismatch {
	pub fn location(&self) -> ResourceLocation {
		match self {
			StateMismatch::Buffer { location, .. } | StateMismatch::Texture { location, .. } => *location,
		}
	}

	/// Name of the buffer or texture in the wrong state.
	pub fn name(&self) -> &str {
		match self {
			StateMismatch::Buffer { name, .. } | StateMismatch::Texture { name, .. } => name,
		}
	}
}

impl Display for StateMismatch {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			StateMismatch::Buffer {
				location,
				name,
				current,
				required,
			} => write!(
				f,
				"Buffer \"{}\" bound to {} is in state {:?} instead of {:?}.",
				name, location, current, required
			)?,
			StateMismatch::Texture {
				location,
				name,
				current,
				required,
			} => write!(
				f,
				"Texture \"{}\" bound to {} is in state {:?} instead of {:?}.",
				name, location, current, required
			)?,
		}
		f.write_str(
			" Did you forget to call transition_resources() or to specify \
			CommitShaderResourcesFlags::TRANSITION_RESOURCES when committing shader resources?",
		)
	}
}

/// A [`TransitionContext`] for verify mode, which logs every mismatch and never expects a transition request.
#[derive(Copy, Clone, Debug, Default)]
pub struct VerifyOnly;

impl<P: ResourcePlatform> TransitionContext<P> for VerifyOnly {
	fn request_memory_barrier(&mut self, buffer: &Arc<Buffer<P>>, _src: BufferAccess, _dst: BufferAccess) {
		unreachable!("verify mode requested a barrier for buffer \"{}\"", buffer.name())
	}

	fn request_layout_transition(&mut self, texture: &Arc<Texture<P>>, _src: ImageAccess, _dst: ImageAccess) {
		unreachable!("verify mode requested a layout transition for texture \"{}\"", texture.name())
	}
}

/// A transition requested from a [`TransitionLog`].
#[derive(Debug)]
pub enum TransitionRequest<P: ResourcePlatform> {
	MemoryBarrier {
		buffer: Arc<Buffer<P>>,
		src: BufferAccess,
		dst: BufferAccess,
	},
	LayoutTransition {
		texture: Arc<Texture<P>>,
		src: ImageAccess,
		dst: ImageAccess,
	},
}

impl<P: ResourcePlatform> TransitionRequest<P> {
	/// Name of the transitioned buffer or texture.
	pub fn name(&self) -> &str {
		match self {
			TransitionRequest::MemoryBarrier { buffer, .. } => buffer.name(),
			TransitionRequest::LayoutTransition { texture, .. } => texture.name(),
		}
	}
}

/// A platform independent [`TransitionContext`] that records all requests and mismatches on the CPU, to be replayed
/// into a command buffer later or inspected. Recorded requests keep their resources alive.
#[derive(Debug)]
pub struct TransitionLog<P: ResourcePlatform> {
	requests: Vec<TransitionRequest<P>>,
	mismatches: Vec<StateMismatch>,
}

impl<P: ResourcePlatform> Default for TransitionLog<P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<P: ResourcePlatform> TransitionLog<P> {
	pub const fn new() -> Self {
		Self {
			requests: Vec::new(),
			mismatches: Vec::new(),
		}
	}

	pub fn requests(&self) -> &[TransitionRequest<P>] {
		&self.requests
	}

	pub fn mismatches(&self) -> &[StateMismatch] {
		&self.mismatches
	}

	pub fn is_empty(&self) -> bool {
		self.requests.is_empty() && self.mismatches.is_empty()
	}

	/// Takes all recorded requests, leaving the mismatches.
	pub fn take_requests(&mut self) -> Vec<TransitionRequest<P>> {
		std::mem::take(&mut self.requests)
	}

	pub fn clear(&mut self) {
		self.requests.clear();
		self.mismatches.clear();
	}
}

impl<P: ResourcePlatform> TransitionContext<P> for TransitionLog<P> {
	fn request_memory_barrier(&mut self, buffer: &Arc<Buffer<P>>, src: BufferAccess, dst: BufferAccess) {
		self.requests.push(TransitionRequest::MemoryBarrier {
			buffer: buffer.clone(),
			src,
			dst,
		});
	}

	fn request_layout_transition(&mut self, texture: &Arc<Texture<P>>, src: ImageAccess, dst: ImageAccess) {
		self.requests.push(TransitionRequest::LayoutTransition {
			texture: texture.clone(),
			src,
			dst,
		});
	}

	fn report_state_mismatch(&mut self, mismatch: StateMismatch) {
		self.mismatches.push(mismatch);
	}
}
