use std::fmt::Debug;

/// The native handle types of a graphics API backend.
///
/// Neither the [`ShaderResourceCache`] nor the transition pass ever look inside these handles, they merely carry them
/// along so that a [`TransitionContext`] of the same platform can record barriers against them.
///
/// [`ShaderResourceCache`]: crate::descriptor::ShaderResourceCache
/// [`TransitionContext`]: crate::pipeline::TransitionContext
pub trait ResourcePlatform: Debug + Sized + Send + Sync + 'static {
	type Buffer: Debug + Send + Sync;
	type BufferView: Debug + Send + Sync;
	type Image: Debug + Send + Sync;
	type ImageView: Debug + Send + Sync;
	type Sampler: Debug + Send + Sync;
}
