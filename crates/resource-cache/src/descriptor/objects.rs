use crate::pipeline::{AccessState, BufferAccess, ImageAccess};
use crate::platform::ResourcePlatform;
use std::sync::Arc;

/// A buffer that can be bound to uniform, storage and atomic counter slots, or be viewed by a [`BufferView`].
///
/// The buffer itself tracks which [`BufferAccess`] it is currently in, so every binding of it observes the same state.
#[derive(Debug)]
pub struct Buffer<P: ResourcePlatform> {
	name: String,
	handle: P::Buffer,
	size: u64,
	access: AccessState<BufferAccess>,
}

impl<P: ResourcePlatform> Buffer<P> {
	pub fn new(name: impl Into<String>, handle: P::Buffer, size: u64, access: BufferAccess) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			handle,
			size,
			access: AccessState::new(access),
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn handle(&self) -> &P::Buffer {
		&self.handle
	}

	pub fn size(&self) -> u64 {
		self.size
	}

	/// The access state this buffer is currently in.
	#[inline]
	pub fn access(&self) -> BufferAccess {
		self.access.load()
	}

	/// Update the tracked access state, e.g. after the buffer was transitioned by a barrier recorded elsewhere.
	#[inline]
	pub fn set_access(&self, access: BufferAccess) {
		self.access.store(access)
	}
}

/// A typed view into a [`Buffer`], bound to texel buffer slots.
#[derive(Debug)]
pub struct BufferView<P: ResourcePlatform> {
	name: String,
	handle: P::BufferView,
	buffer: Arc<Buffer<P>>,
}

impl<P: ResourcePlatform> BufferView<P> {
	pub fn new(name: impl Into<String>, handle: P::BufferView, buffer: Arc<Buffer<P>>) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			handle,
			buffer,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn handle(&self) -> &P::BufferView {
		&self.handle
	}

	/// The buffer this view looks into, which owns the access state.
	pub fn buffer(&self) -> &Arc<Buffer<P>> {
		&self.buffer
	}
}

/// A texture, which tracks the [`ImageAccess`] and thus the layout it is currently in.
#[derive(Debug)]
pub struct Texture<P: ResourcePlatform> {
	name: String,
	handle: P::Image,
	access: AccessState<ImageAccess>,
}

impl<P: ResourcePlatform> Texture<P> {
	pub fn new(name: impl Into<String>, handle: P::Image, access: ImageAccess) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			handle,
			access: AccessState::new(access),
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn handle(&self) -> &P::Image {
		&self.handle
	}

	/// The access state and layout this texture is currently in.
	#[inline]
	pub fn access(&self) -> ImageAccess {
		self.access.load()
	}

	/// Update the tracked access state, e.g. after the texture was transitioned by a barrier recorded elsewhere.
	#[inline]
	pub fn set_access(&self, access: ImageAccess) {
		self.access.store(access)
	}
}

/// A view into a [`Texture`], bound to image slots.
#[derive(Debug)]
pub struct TextureView<P: ResourcePlatform> {
	name: String,
	handle: P::ImageView,
	texture: Arc<Texture<P>>,
}

impl<P: ResourcePlatform> TextureView<P> {
	pub fn new(name: impl Into<String>, handle: P::ImageView, texture: Arc<Texture<P>>) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			handle,
			texture,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn handle(&self) -> &P::ImageView {
		&self.handle
	}

	/// The texture this view looks into, which owns the access state.
	pub fn texture(&self) -> &Arc<Texture<P>> {
		&self.texture
	}
}

#[derive(Debug)]
pub struct Sampler<P: ResourcePlatform> {
	name: String,
	handle: P::Sampler,
}

impl<P: ResourcePlatform> Sampler<P> {
	pub fn new(name: impl Into<String>, handle: P::Sampler) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			handle,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn handle(&self) -> &P::Sampler {
		&self.handle
	}
}
