use crate::descriptor::{DescriptorCounts, ResourceCacheError, ResourceKind};
use crate::pipeline::{BufferAccess, ImageAccess};
use ash::vk::{AccessFlags2, DescriptorPoolSize, DescriptorType, ImageLayout, PipelineStageFlags2};
use smallvec::SmallVec;

type Stage = PipelineStageFlags2;
type Access = AccessFlags2;

const SHADER_STAGES: Stage = Stage::from_raw(Stage::ALL_GRAPHICS.as_raw() | Stage::COMPUTE_SHADER.as_raw());
const MEMORY_READ_WRITE: Access = Access::from_raw(Access::MEMORY_READ.as_raw() | Access::MEMORY_WRITE.as_raw());
const STORAGE_READ_WRITE: Access =
	Access::from_raw(Access::SHADER_STORAGE_READ.as_raw() | Access::SHADER_STORAGE_WRITE.as_raw());

/// Pipeline stages and memory accesses a buffer in some [`BufferAccess`] state is used with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AshBufferAccess {
	pub stage_mask: PipelineStageFlags2,
	pub access_mask: AccessFlags2,
}

/// Pipeline stages, memory accesses and image layout of an image in some [`ImageAccess`] state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AshImageAccess {
	pub stage_mask: PipelineStageFlags2,
	pub access_mask: AccessFlags2,
	pub image_layout: ImageLayout,
}

impl BufferAccess {
	pub fn to_ash_buffer_access(&self) -> AshBufferAccess {
		let (stage_mask, access_mask) = match self {
			BufferAccess::Undefined => (Stage::ALL_COMMANDS, Access::NONE),
			BufferAccess::General => (Stage::ALL_COMMANDS, MEMORY_READ_WRITE),
			BufferAccess::TransferRead => (Stage::TRANSFER, Access::TRANSFER_READ),
			BufferAccess::TransferWrite => (Stage::TRANSFER, Access::TRANSFER_WRITE),
			BufferAccess::UniformRead => (SHADER_STAGES, Access::UNIFORM_READ),
			BufferAccess::ShaderRead => (SHADER_STAGES, Access::SHADER_READ),
			BufferAccess::ShaderReadWrite => (SHADER_STAGES, STORAGE_READ_WRITE),
			BufferAccess::HostAccess => (Stage::HOST, Access::HOST_READ | Access::HOST_WRITE),
			BufferAccess::IndirectCommandRead => (Stage::DRAW_INDIRECT, Access::INDIRECT_COMMAND_READ),
			BufferAccess::IndexRead => (Stage::INDEX_INPUT, Access::INDEX_READ),
			BufferAccess::VertexAttributeRead => (Stage::VERTEX_ATTRIBUTE_INPUT, Access::VERTEX_ATTRIBUTE_READ),
		};
		AshBufferAccess {
			stage_mask,
			access_mask,
		}
	}
}

impl ImageAccess {
	pub fn to_ash_image_layout(&self) -> ImageLayout {
		match self {
			ImageAccess::Undefined => ImageLayout::UNDEFINED,
			ImageAccess::General | ImageAccess::StorageReadWrite => ImageLayout::GENERAL,
			ImageAccess::TransferRead => ImageLayout::TRANSFER_SRC_OPTIMAL,
			ImageAccess::TransferWrite => ImageLayout::TRANSFER_DST_OPTIMAL,
			ImageAccess::SampledRead => ImageLayout::SHADER_READ_ONLY_OPTIMAL,
			ImageAccess::ColorAttachment => ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
			ImageAccess::DepthStencilAttachment => ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
			ImageAccess::Present => ImageLayout::PRESENT_SRC_KHR,
		}
	}

	pub fn to_ash_image_access(&self) -> AshImageAccess {
		let (stage_mask, access_mask) = match self {
			ImageAccess::Undefined | ImageAccess::Present => (Stage::ALL_COMMANDS, Access::NONE),
			ImageAccess::General => (Stage::ALL_COMMANDS, MEMORY_READ_WRITE),
			ImageAccess::TransferRead => (Stage::TRANSFER, Access::TRANSFER_READ),
			ImageAccess::TransferWrite => (Stage::TRANSFER, Access::TRANSFER_WRITE),
			ImageAccess::StorageReadWrite => (SHADER_STAGES, STORAGE_READ_WRITE),
			ImageAccess::SampledRead => (SHADER_STAGES, Access::SHADER_SAMPLED_READ),
			ImageAccess::ColorAttachment => (
				Stage::COLOR_ATTACHMENT_OUTPUT,
				Access::COLOR_ATTACHMENT_READ | Access::COLOR_ATTACHMENT_WRITE,
			),
			ImageAccess::DepthStencilAttachment => (
				Stage::EARLY_FRAGMENT_TESTS | Stage::LATE_FRAGMENT_TESTS,
				Access::DEPTH_STENCIL_ATTACHMENT_READ | Access::DEPTH_STENCIL_ATTACHMENT_WRITE,
			),
		};
		AshImageAccess {
			stage_mask,
			access_mask,
			image_layout: self.to_ash_image_layout(),
		}
	}
}

impl ResourceKind {
	pub fn to_ash_descriptor_type(&self) -> DescriptorType {
		match self {
			ResourceKind::UniformBuffer => DescriptorType::UNIFORM_BUFFER,
			// atomic counters are lowered to storage buffers by SPIR-V for Vulkan
			ResourceKind::StorageBuffer | ResourceKind::AtomicCounter => DescriptorType::STORAGE_BUFFER,
			ResourceKind::UniformTexelBuffer => DescriptorType::UNIFORM_TEXEL_BUFFER,
			ResourceKind::StorageTexelBuffer => DescriptorType::STORAGE_TEXEL_BUFFER,
			ResourceKind::SeparateImage => DescriptorType::SAMPLED_IMAGE,
			ResourceKind::SampledImage => DescriptorType::COMBINED_IMAGE_SAMPLER,
			ResourceKind::StorageImage => DescriptorType::STORAGE_IMAGE,
			ResourceKind::SeparateSampler => DescriptorType::SAMPLER,
		}
	}
}

impl DescriptorCounts {
	/// Pool sizes to allocate `sets` copies of the counted descriptors, with kinds mapping to the same
	/// [`DescriptorType`] merged. Fails with [`ResourceCacheError::TooManyResources`] if any pool size does not fit
	/// into a `u32`.
	pub fn to_ash_pool_sizes(&self, sets: u32) -> Result<SmallVec<[DescriptorPoolSize; 8]>, ResourceCacheError> {
		let mut sizes = SmallVec::<[DescriptorPoolSize; 8]>::new();
		for (kind, count) in self.iter() {
			let ty = kind.to_ash_descriptor_type();
			let count = count.checked_mul(sets).ok_or(ResourceCacheError::TooManyResources)?;
			match sizes.iter_mut().find(|size| size.ty == ty) {
				Some(size) => {
					size.descriptor_count = size
						.descriptor_count
						.checked_add(count)
						.ok_or(ResourceCacheError::TooManyResources)?
				}
				None => sizes.push(DescriptorPoolSize {
					ty,
					descriptor_count: count,
				}),
			}
		}
		Ok(sizes)
	}
}
