use crate::descriptor::Resource;
use crate::platform::ResourcePlatform;
use std::fmt::{Debug, Formatter};
use std::ptr::NonNull;

/// A fixed-size group of [`Resource`] slots, matching one descriptor set of a pipeline layout.
///
/// The set does not own its slots, it is merely a view into the contiguous slot storage of the
/// [`ShaderResourceCache`] that created it.
///
/// [`ShaderResourceCache`]: crate::descriptor::ShaderResourceCache
pub struct DescriptorSet<P: ResourcePlatform> {
	size: u32,
	resources: Option<NonNull<Resource<P>>>,
}

// Safety: DescriptorSet is a view of Resources, which are Send + Sync, and is only handed out by its cache which
// enforces borrowing rules
unsafe impl<P: ResourcePlatform> Send for DescriptorSet<P> {}
unsafe impl<P: ResourcePlatform> Sync for DescriptorSet<P> {}

impl<P: ResourcePlatform> DescriptorSet<P> {
	/// # Safety
	/// `resources` must point to `size` initialized Resources which outlive this set and are not accessed by anyone
	/// else. May only be `None` if `size` is 0.
	pub(crate) unsafe fn new(size: u32, resources: Option<NonNull<Resource<P>>>) -> Self {
		debug_assert!(resources.is_some() || size == 0);
		Self { size, resources }
	}

	#[inline]
	pub fn size(&self) -> u32 {
		self.size
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.size == 0
	}

	#[inline]
	pub fn resources(&self) -> &[Resource<P>] {
		match self.resources {
			// Safety: see Self::new
			Some(ptr) => unsafe { std::slice::from_raw_parts(ptr.as_ptr(), self.size as usize) },
			None => &[],
		}
	}

	#[inline]
	pub(crate) fn resources_mut(&mut self) -> &mut [Resource<P>] {
		match self.resources {
			// Safety: see Self::new, &mut self guarantees exclusive access
			Some(ptr) => unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), self.size as usize) },
			None => &mut [],
		}
	}

	#[inline]
	pub fn resource(&self, index: u32) -> &Resource<P> {
		&self.resources()[index as usize]
	}

	#[inline]
	pub(crate) fn resource_mut(&mut self, index: u32) -> &mut Resource<P> {
		&mut self.resources_mut()[index as usize]
	}
}

impl<P: ResourcePlatform> Debug for DescriptorSet<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DescriptorSet")
			.field("size", &self.size)
			.field("resources", &self.resources())
			.finish()
	}
}
