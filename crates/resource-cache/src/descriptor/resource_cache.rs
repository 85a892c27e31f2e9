use crate::backing::{MemoryAllocator, RawBlock};
use crate::descriptor::{
	BindError, BoundObject, BoundObjectType, DescriptorCounts, DescriptorSet, Resource, ResourceKind, ResourceLocation,
};
use crate::platform::ResourcePlatform;
use std::alloc::Layout;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::Arc;
use thiserror::Error;

/// Caches the objects bound to every shader visible binding slot of a pipeline.
///
/// All [`DescriptorSet`] headers and all of their [`Resource`] slots live in a single block of memory from a
/// [`MemoryAllocator`]:
/// ```text
/// | DescriptorSet[0] | ... | DescriptorSet[n-1] | Set 0: Res[0] ... Res[s0-1] | ... | Set n-1: Res[0] ... Res[sn-1] |
/// ```
/// Each set views its own contiguous range of slots, so iterating all slots in storage order visits set 0 first,
/// then set 1 and so on.
///
/// Slots are only ever classified by [`Self::initialize_resources`] and bound by [`Self::set_resource`]. Sets and
/// slots are never handed out mutably, so they can neither be moved between caches nor swapped within one:
/// ```compile_fail
/// # use gpu_resource_cache::descriptor::ShaderResourceCache;
/// # use gpu_resource_cache::platform::Null;
/// let mut a = ShaderResourceCache::<Null>::new();
/// let mut b = ShaderResourceCache::<Null>::new();
/// std::mem::swap(a.descriptor_set_mut(0), b.descriptor_set_mut(0));
/// ```
/// ```compile_fail
/// # use gpu_resource_cache::descriptor::ShaderResourceCache;
/// # use gpu_resource_cache::platform::Null;
/// # let cache = ShaderResourceCache::<Null>::new();
/// let set = cache.descriptor_set(0);
/// set.resources_mut().swap(0, 1);
/// ```
pub struct ShaderResourceCache<P: ResourcePlatform> {
	allocator: Option<Arc<dyn MemoryAllocator>>,
	memory: Option<RawBlock>,
	resources_offset: usize,
	num_sets: u32,
	total_resources: u32,
	_phantom: PhantomData<Resource<P>>,
}

// Safety: the cache exclusively owns its memory block, which only contains Send + Sync DescriptorSets and Resources
unsafe impl<P: ResourcePlatform> Send for ShaderResourceCache<P> {}
unsafe impl<P: ResourcePlatform> Sync for ShaderResourceCache<P> {}

impl<P: ResourcePlatform> Default for ShaderResourceCache<P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<P: ResourcePlatform> ShaderResourceCache<P> {
	/// Creates an empty cache, which must be initialized with [`Self::initialize_sets`] before use.
	pub const fn new() -> Self {
		Self {
			allocator: None,
			memory: None,
			resources_offset: 0,
			num_sets: 0,
			total_resources: 0,
			_phantom: PhantomData,
		}
	}

	/// Lays out memory for one [`DescriptorSet`] per entry of `set_sizes`, each with that many [`Resource`] slots.
	/// All slots start out unclassified and must be given their kind with [`Self::initialize_resources`].
	///
	/// A cache can only be initialized once, calling this again fails with
	/// [`ResourceCacheError::AlreadyInitialized`] and leaves the cache unchanged.
	pub fn initialize_sets(
		&mut self,
		allocator: Arc<dyn MemoryAllocator>,
		set_sizes: &[u32],
	) -> Result<(), ResourceCacheError> {
		profiling::function_scope!();
		if self.allocator.is_some() {
			return Err(ResourceCacheError::AlreadyInitialized);
		}

		let num_sets = u32::try_from(set_sizes.len()).map_err(|_| ResourceCacheError::TooManyResources)?;
		let total_resources = set_sizes
			.iter()
			.try_fold(0u32, |acc, size| acc.checked_add(*size))
			.ok_or(ResourceCacheError::TooManyResources)?;
		let (layout, resources_offset) =
			Self::memory_layout(num_sets, total_resources).ok_or(ResourceCacheError::TooManyResources)?;

		if layout.size() > 0 {
			let memory = RawBlock::allocate(allocator.clone(), layout, "Memory for shader resource cache data");
			// Safety: the block is large enough for num_sets sets followed by total_resources resources, with both
			// arrays properly aligned as computed by memory_layout
			unsafe {
				let base = memory.as_ptr().as_ptr();
				let sets = base.cast::<DescriptorSet<P>>();
				let mut cursor = base.add(resources_offset).cast::<Resource<P>>();
				for (set, &size) in set_sizes.iter().enumerate() {
					for i in 0..size as usize {
						cursor.add(i).write(Resource::unclassified());
					}
					let resources = if size > 0 { Some(NonNull::new_unchecked(cursor)) } else { None };
					sets.add(set).write(DescriptorSet::new(size, resources));
					cursor = cursor.add(size as usize);
				}
				assert_eq!(
					cursor.cast::<u8>(),
					base.add(memory.size()),
					"resources must exactly fill the allocated memory"
				);
			}
			self.memory = Some(memory);
		}

		self.allocator = Some(allocator);
		self.resources_offset = resources_offset;
		self.num_sets = num_sets;
		self.total_resources = total_resources;
		Ok(())
	}

	/// Layout of the memory block and byte offset of the first resource. `None` on overflow.
	fn memory_layout(num_sets: u32, total_resources: u32) -> Option<(Layout, usize)> {
		let sets = Layout::array::<DescriptorSet<P>>(num_sets as usize).ok()?;
		let resources = Layout::array::<Resource<P>>(total_resources as usize).ok()?;
		sets.extend(resources).ok()
	}

	/// Assigns `kind` to the `count` slots starting at `offset` within descriptor set `set`.
	///
	/// Every slot must be initialized exactly once, before anything is bound to it. Initializing overlapping ranges
	/// twice is a usage error which is only detected with debug assertions.
	pub fn initialize_resources(&mut self, set: u32, offset: u32, count: u32, kind: ResourceKind) {
		let descriptor_set = self.descriptor_set_mut(set);
		let size = descriptor_set.size();
		assert!(
			offset.checked_add(count).is_some_and(|end| end <= size),
			"Resources {}..{}+{} are out of range of set {} with {} resources",
			offset,
			offset,
			count,
			set,
			size
		);
		let range = offset as usize..(offset + count) as usize;
		for resource in &mut descriptor_set.resources_mut()[range] {
			resource.classify(kind);
		}
	}

	/// Whether [`Self::initialize_sets`] has been called.
	#[inline]
	pub fn is_initialized(&self) -> bool {
		self.allocator.is_some()
	}

	#[inline]
	pub fn num_sets(&self) -> u32 {
		self.num_sets
	}

	#[inline]
	pub fn total_resources(&self) -> u32 {
		self.total_resources
	}

	/// The size of the memory block backing this cache, in bytes.
	pub fn memory_size(&self) -> usize {
		self.memory.as_ref().map_or(0, RawBlock::size)
	}

	#[inline]
	pub fn descriptor_sets(&self) -> &[DescriptorSet<P>] {
		match &self.memory {
			// Safety: the first num_sets elements of memory are initialized DescriptorSets
			Some(memory) => unsafe {
				std::slice::from_raw_parts(memory.as_ptr().as_ptr().cast(), self.num_sets as usize)
			},
			None => &[],
		}
	}

	#[inline]
	fn descriptor_sets_mut(&mut self) -> &mut [DescriptorSet<P>] {
		match &self.memory {
			// Safety: see descriptor_sets(), &mut self guarantees exclusive access
			Some(memory) => unsafe {
				std::slice::from_raw_parts_mut(memory.as_ptr().as_ptr().cast(), self.num_sets as usize)
			},
			None => &mut [],
		}
	}

	#[inline]
	pub fn descriptor_set(&self, index: u32) -> &DescriptorSet<P> {
		&self.descriptor_sets()[index as usize]
	}

	#[inline]
	pub(crate) fn descriptor_set_mut(&mut self, index: u32) -> &mut DescriptorSet<P> {
		&mut self.descriptor_sets_mut()[index as usize]
	}

	/// All resources of all sets in storage order.
	#[inline]
	pub fn resources(&self) -> &[Resource<P>] {
		match &self.memory {
			// Safety: total_resources initialized Resources follow the DescriptorSets at resources_offset
			Some(memory) => unsafe {
				std::slice::from_raw_parts(
					memory.as_ptr().as_ptr().add(self.resources_offset).cast(),
					self.total_resources as usize,
				)
			},
			None => &[],
		}
	}

	#[inline]
	pub fn resource(&self, set: u32, slot: u32) -> &Resource<P> {
		self.descriptor_set(set).resource(slot)
	}

	/// Binds `object` to a slot, or clears it with `None`, and returns the previously bound object.
	///
	/// The object must match the [`ResourceKind`] the slot was initialized with: buffers for uniform, storage and
	/// atomic counter slots, buffer views for texel buffers, texture views for images and samplers for separate
	/// samplers.
	pub fn set_resource(
		&mut self,
		set: u32,
		slot: u32,
		object: Option<BoundObject<P>>,
	) -> Result<Option<BoundObject<P>>, ResourceCacheError> {
		let name = object.as_ref().map(|o| o.name().to_owned());
		self.descriptor_set_mut(set)
			.resource_mut(slot)
			.bind(object)
			.map_err(|err| {
				let location = ResourceLocation { set, slot };
				match err {
					BindError::Unclassified => ResourceCacheError::UninitializedResource { location },
					BindError::Incompatible { kind, object_type } => ResourceCacheError::IncompatibleResource {
						location,
						kind,
						object_type,
						name: name.unwrap_or_default(),
					},
				}
			})
	}

	/// Maps an index into [`Self::resources`] back to its set and slot.
	pub fn locate(&self, index: u32) -> ResourceLocation {
		let mut first = 0;
		for (set, descriptor_set) in self.descriptor_sets().iter().enumerate() {
			if index < first + descriptor_set.size() {
				return ResourceLocation {
					set: set as u32,
					slot: index - first,
				};
			}
			first += descriptor_set.size();
		}
		panic!("Resource index {} out of range of {} resources", index, self.total_resources)
	}

	/// Counts the initialized slots per [`ResourceKind`].
	pub fn descriptor_counts(&self) -> DescriptorCounts {
		self.resources().iter().filter_map(Resource::kind).collect()
	}
}

impl<P: ResourcePlatform> Drop for ShaderResourceCache<P> {
	fn drop(&mut self) {
		if let Some(memory) = &self.memory {
			// Safety: all sets and resources were initialized by initialize_sets and are dropped exactly once here,
			// the RawBlock itself is returned to the allocator afterward when the field is dropped
			unsafe {
				let base = memory.as_ptr().as_ptr();
				let resources = base.add(self.resources_offset).cast::<Resource<P>>();
				for i in 0..self.total_resources as usize {
					std::ptr::drop_in_place(resources.add(i));
				}
				let sets = base.cast::<DescriptorSet<P>>();
				for i in 0..self.num_sets as usize {
					std::ptr::drop_in_place(sets.add(i));
				}
			}
		}
	}
}

impl<P: ResourcePlatform> Debug for ShaderResourceCache<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ShaderResourceCache")
			.field("initialized", &self.is_initialized())
			.field("memory", &self.memory)
			.field("sets", &self.descriptor_sets())
			.finish()
	}
}

/// Errors of setting up and binding a [`ShaderResourceCache`]. All of these indicate programming errors.
#[derive(Error)]
#[non_exhaustive]
pub enum ResourceCacheError {
	#[error("ShaderResourceCache is already initialized")]
	AlreadyInitialized,
	#[error("ShaderResourceCache cannot hold this many resources")]
	TooManyResources,
	#[error("Resource {location} was never initialized with a resource kind")]
	UninitializedResource { location: ResourceLocation },
	#[error("Cannot bind {object_type:?} \"{name}\" to {kind:?} resource {location}")]
	IncompatibleResource {
		location: ResourceLocation,
		kind: ResourceKind,
		object_type: BoundObjectType,
		name: String,
	},
}

impl Debug for ResourceCacheError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		std::fmt::Display::fmt(self, f)
	}
}
