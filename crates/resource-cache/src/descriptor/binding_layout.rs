use crate::backing::MemoryAllocator;
use crate::descriptor::{ResourceCacheError, ResourceKind, ShaderResourceCache};
use crate::platform::ResourcePlatform;
use smallvec::SmallVec;
use std::sync::Arc;

/// A range of binding slots discovered by shader reflection: `array_size` slots of the same `kind`, starting at
/// `offset` within descriptor set `set`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ResourceBindingDesc {
	pub set: u32,
	pub offset: u32,
	pub array_size: u32,
	pub kind: ResourceKind,
}

impl ResourceBindingDesc {
	pub const fn new(set: u32, offset: u32, array_size: u32, kind: ResourceKind) -> Self {
		Self {
			set,
			offset,
			array_size,
			kind,
		}
	}

	/// The slot following the last slot of this binding, `None` if it does not fit into a `u32`.
	pub const fn end(&self) -> Option<u32> {
		self.offset.checked_add(self.array_size)
	}
}

/// Computes how many slots each descriptor set needs to fit all `bindings`. Sets without any bindings below the
/// highest referenced set are kept with a size of 0.
pub fn set_sizes(bindings: &[ResourceBindingDesc]) -> Result<SmallVec<[u32; 4]>, ResourceCacheError> {
	let mut sizes = SmallVec::<[u32; 4]>::new();
	for binding in bindings {
		let end = binding.end().ok_or(ResourceCacheError::TooManyResources)?;
		let set = usize::try_from(binding.set).map_err(|_| ResourceCacheError::TooManyResources)?;
		if sizes.len() <= set {
			sizes.resize(set + 1, 0);
		}
		sizes[set] = sizes[set].max(end);
	}
	Ok(sizes)
}

impl<P: ResourcePlatform> ShaderResourceCache<P> {
	/// Initializes this cache from shader reflection: sizes every set to fit its bindings and assigns each binding's
	/// kind to its slots. Slots not covered by any binding stay unclassified.
	pub fn initialize_from_bindings(
		&mut self,
		allocator: Arc<dyn MemoryAllocator>,
		bindings: &[ResourceBindingDesc],
	) -> Result<(), ResourceCacheError> {
		self.initialize_sets(allocator, &set_sizes(bindings)?)?;
		for binding in bindings {
			self.initialize_resources(binding.set, binding.offset, binding.array_size, binding.kind);
		}
		Ok(())
	}
}
