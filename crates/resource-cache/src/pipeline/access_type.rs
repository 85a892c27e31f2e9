use num_derive::{FromPrimitive, ToPrimitive};

/// The native access state a buffer is currently in, or is required to be in.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum BufferAccess {
	/// Contents are undefined, like after creation.
	Undefined,
	General,
	TransferRead,
	TransferWrite,
	/// Read as constant data by a uniform buffer binding.
	UniformRead,
	/// Read by a shader, but never written, e.g. by uniform texel buffers.
	ShaderRead,
	/// Read and written by a shader, e.g. by storage buffers and storage texel buffers.
	ShaderReadWrite,
	HostAccess,
	IndirectCommandRead,
	IndexRead,
	VertexAttributeRead,
}

impl BufferAccess {
	pub fn is_shader_access(&self) -> bool {
		matches!(
			self,
			BufferAccess::UniformRead | BufferAccess::ShaderRead | BufferAccess::ShaderReadWrite
		)
	}
}

/// The native access state and layout an image is currently in, or is required to be in.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, FromPrimitive, ToPrimitive)]
pub enum ImageAccess {
	/// Contents are undefined, like after creation.
	Undefined,
	General,
	TransferRead,
	TransferWrite,
	/// Read and written as a storage image, in general layout.
	StorageReadWrite,
	/// Sampled or read by a shader, in shader read only layout.
	SampledRead,
	ColorAttachment,
	DepthStencilAttachment,
	Present,
}

impl ImageAccess {
	pub fn is_shader_access(&self) -> bool {
		matches!(self, ImageAccess::StorageReadWrite | ImageAccess::SampledRead)
	}
}
