use crate::descriptor::{Buffer, Texture};
use crate::pipeline::{BufferAccess, ImageAccess, TransitionContext};
use crate::platform::ash::{Ash, AshImage};
use ash::vk;
use ash::vk::{
	BufferMemoryBarrier2, CommandBuffer, DependencyInfo, ImageMemoryBarrier2, QUEUE_FAMILY_IGNORED, WHOLE_SIZE,
};
use smallvec::SmallVec;
use std::sync::Arc;

/// Collects the barriers requested by a transition pass, to be recorded as a single
/// [`ash::Device::cmd_pipeline_barrier2`] with [`Self::flush`].
#[derive(Debug, Clone, Default)]
pub struct AshBarrierCollector {
	buffers: SmallVec<[BufferMemoryBarrier2<'static>; 10]>,
	images: SmallVec<[ImageMemoryBarrier2<'static>; 10]>,
}

impl AshBarrierCollector {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.buffers.is_empty() && self.images.is_empty()
	}

	pub fn buffer_barriers(&self) -> &[BufferMemoryBarrier2<'static>] {
		&self.buffers
	}

	pub fn image_barriers(&self) -> &[ImageMemoryBarrier2<'static>] {
		&self.images
	}

	pub fn push_buffer_barrier(&mut self, buffer: BufferMemoryBarrier2<'static>) {
		self.buffers.push(buffer);
	}

	pub fn push_image_barrier(&mut self, image: ImageMemoryBarrier2<'static>) {
		self.images.push(image);
	}

	/// Records all collected barriers into `cmd` and clears them. Does nothing if no barriers were collected.
	///
	/// # Safety
	/// `cmd` must be a command buffer of `device` in the recording state, outside a render pass. All buffers and
	/// images referenced by the collected barriers must still be alive.
	pub unsafe fn flush(&mut self, device: &ash::Device, cmd: CommandBuffer) {
		if self.is_empty() {
			return;
		}
		device.cmd_pipeline_barrier2(
			cmd,
			&DependencyInfo::default()
				.buffer_memory_barriers(&self.buffers)
				.image_memory_barriers(&self.images),
		);
		self.buffers.clear();
		self.images.clear();
	}
}

/// A barrier making the whole `buffer` available to `dst` after its use in `src`, within the same queue family.
pub fn buffer_barrier(buffer: vk::Buffer, src: BufferAccess, dst: BufferAccess) -> BufferMemoryBarrier2<'static> {
	let src = src.to_ash_buffer_access();
	let dst = dst.to_ash_buffer_access();
	BufferMemoryBarrier2 {
		src_stage_mask: src.stage_mask,
		src_access_mask: src.access_mask,
		dst_stage_mask: dst.stage_mask,
		dst_access_mask: dst.access_mask,
		src_queue_family_index: QUEUE_FAMILY_IGNORED,
		dst_queue_family_index: QUEUE_FAMILY_IGNORED,
		buffer,
		offset: 0,
		size: WHOLE_SIZE,
		..Default::default()
	}
}

/// A barrier moving every subresource of `image` from the layout of `src` to the layout of `dst`, within the same
/// queue family.
pub fn image_barrier(image: &AshImage, src: ImageAccess, dst: ImageAccess) -> ImageMemoryBarrier2<'static> {
	let src = src.to_ash_image_access();
	let dst = dst.to_ash_image_access();
	ImageMemoryBarrier2 {
		src_stage_mask: src.stage_mask,
		src_access_mask: src.access_mask,
		dst_stage_mask: dst.stage_mask,
		dst_access_mask: dst.access_mask,
		old_layout: src.image_layout,
		new_layout: dst.image_layout,
		src_queue_family_index: QUEUE_FAMILY_IGNORED,
		dst_queue_family_index: QUEUE_FAMILY_IGNORED,
		image: image.image,
		subresource_range: image.whole_range(),
		..Default::default()
	}
}

impl TransitionContext<Ash> for AshBarrierCollector {
	fn request_memory_barrier(&mut self, buffer: &Arc<Buffer<Ash>>, src: BufferAccess, dst: BufferAccess) {
		self.push_buffer_barrier(buffer_barrier(*buffer.handle(), src, dst));
	}

	fn request_layout_transition(&mut self, texture: &Arc<Texture<Ash>>, src: ImageAccess, dst: ImageAccess) {
		self.push_image_barrier(image_barrier(texture.handle(), src, dst));
	}
}
