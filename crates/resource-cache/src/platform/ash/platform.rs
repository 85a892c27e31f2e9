use crate::platform::ResourcePlatform;
use ash::vk::{
	Buffer, BufferView, Image, ImageAspectFlags, ImageSubresourceRange, ImageView, Sampler, REMAINING_ARRAY_LAYERS,
	REMAINING_MIP_LEVELS,
};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Ash;

impl ResourcePlatform for Ash {
	type Buffer = Buffer;
	type BufferView = BufferView;
	type Image = AshImage;
	type ImageView = ImageView;
	type Sampler = Sampler;
}

/// An image with the aspects its layout transitions must cover.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AshImage {
	pub image: Image,
	pub aspect: ImageAspectFlags,
}

impl AshImage {
	pub const fn new(image: Image, aspect: ImageAspectFlags) -> Self {
		Self { image, aspect }
	}

	pub const fn color(image: Image) -> Self {
		Self::new(image, ImageAspectFlags::COLOR)
	}

	/// Every mip level and array layer of this image's aspects.
	pub const fn whole_range(&self) -> ImageSubresourceRange {
		ImageSubresourceRange {
			aspect_mask: self.aspect,
			base_mip_level: 0,
			level_count: REMAINING_MIP_LEVELS,
			base_array_layer: 0,
			layer_count: REMAINING_ARRAY_LAYERS,
		}
	}
}
