use crate::pipeline::{BufferAccess, ImageAccess};

/// The kind of shader resource a binding slot was declared as by shader reflection.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ResourceKind {
	UniformBuffer,
	StorageBuffer,
	UniformTexelBuffer,
	StorageTexelBuffer,
	SeparateImage,
	SampledImage,
	StorageImage,
	AtomicCounter,
	SeparateSampler,
}

impl ResourceKind {
	pub const COUNT: usize = 9;

	pub const ALL: [ResourceKind; Self::COUNT] = [
		ResourceKind::UniformBuffer,
		ResourceKind::StorageBuffer,
		ResourceKind::UniformTexelBuffer,
		ResourceKind::StorageTexelBuffer,
		ResourceKind::SeparateImage,
		ResourceKind::SampledImage,
		ResourceKind::StorageImage,
		ResourceKind::AtomicCounter,
		ResourceKind::SeparateSampler,
	];

	#[inline]
	pub const fn to_usize(self) -> usize {
		self as usize
	}

	/// The state the bound resource must be in before a draw or dispatch may consume it.
	pub const fn required_state(self) -> RequiredState {
		match self {
			ResourceKind::UniformBuffer => RequiredState::Buffer(BufferAccess::UniformRead),
			ResourceKind::StorageBuffer => RequiredState::Buffer(BufferAccess::ShaderReadWrite),
			ResourceKind::UniformTexelBuffer => RequiredState::Buffer(BufferAccess::ShaderRead),
			ResourceKind::StorageTexelBuffer => RequiredState::Buffer(BufferAccess::ShaderReadWrite),
			ResourceKind::SeparateImage | ResourceKind::SampledImage => RequiredState::Image(ImageAccess::SampledRead),
			ResourceKind::StorageImage => RequiredState::Image(ImageAccess::StorageReadWrite),
			ResourceKind::AtomicCounter | ResourceKind::SeparateSampler => RequiredState::None,
		}
	}

	/// The type of object a slot of this kind can be bound to.
	pub const fn object_type(self) -> BoundObjectType {
		match self {
			ResourceKind::UniformBuffer | ResourceKind::StorageBuffer | ResourceKind::AtomicCounter => {
				BoundObjectType::Buffer
			}
			ResourceKind::UniformTexelBuffer | ResourceKind::StorageTexelBuffer => BoundObjectType::BufferView,
			ResourceKind::SeparateImage | ResourceKind::SampledImage | ResourceKind::StorageImage => {
				BoundObjectType::TextureView
			}
			ResourceKind::SeparateSampler => BoundObjectType::Sampler,
		}
	}
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum RequiredState {
	/// No state tracking, like atomic counters and samplers.
	None,
	Buffer(BufferAccess),
	Image(ImageAccess),
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum BoundObjectType {
	Buffer,
	BufferView,
	TextureView,
	Sampler,
}
