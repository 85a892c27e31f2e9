#![cfg(test)]

use crate::CountingAllocator;
use gpu_resource_cache::descriptor::{
	Buffer, Resource, ResourceBindingDesc, ResourceCacheError, ResourceKind, Sampler, ShaderResourceCache, Texture,
	TextureView,
};
use gpu_resource_cache::pipeline::{BufferAccess, ImageAccess};
use gpu_resource_cache::platform::Null;
use std::mem::size_of;

/// Index of the first slot of every set within the flat slot storage, derived from the addresses the sets view.
fn set_offsets(cache: &ShaderResourceCache<Null>) -> Vec<Option<usize>> {
	let base = cache.resources().as_ptr() as usize;
	cache
		.descriptor_sets()
		.iter()
		.map(|set| {
			(!set.is_empty()).then(|| (set.resources().as_ptr() as usize - base) / size_of::<Resource<Null>>())
		})
		.collect()
}

#[test]
fn test_sets_partition_storage() -> anyhow::Result<()> {
	let cases: [&[u32]; 6] = [&[], &[0], &[1], &[4, 0, 3], &[0, 0, 7, 1], &[16, 16, 16, 16]];
	for sizes in cases {
		let allocator = CountingAllocator::new();
		let mut cache = ShaderResourceCache::<Null>::new();
		cache.initialize_sets(allocator.clone(), sizes)?;

		let total: u32 = sizes.iter().sum();
		assert_eq!(cache.num_sets() as usize, sizes.len());
		assert_eq!(cache.total_resources(), total);
		assert_eq!(cache.resources().len(), total as usize);
		assert_eq!(
			cache.descriptor_sets().iter().map(|set| set.size()).sum::<u32>(),
			total
		);

		let mut expected = 0;
		for ((set, size), offset) in cache.descriptor_sets().iter().zip(sizes).zip(set_offsets(&cache)) {
			assert_eq!(set.size(), *size);
			if let Some(offset) = offset {
				assert_eq!(offset, expected, "set ranges must be contiguous and in set order");
			}
			expected += *size as usize;
		}
		assert_eq!(expected, total as usize);

		// only a cache without any sets has nothing to allocate
		assert_eq!(allocator.allocations(), usize::from(!sizes.is_empty()));
		assert_eq!(allocator.live_bytes(), cache.memory_size());
	}
	Ok(())
}

#[test]
fn test_second_initialization_keeps_layout() -> anyhow::Result<()> {
	let allocator = CountingAllocator::new();
	let mut cache = ShaderResourceCache::<Null>::new();
	cache.initialize_sets(allocator.clone(), &[2, 3])?;
	cache.initialize_resources(1, 0, 3, ResourceKind::StorageImage);

	let err = cache.initialize_sets(allocator.clone(), &[8]).unwrap_err();
	assert!(matches!(err, ResourceCacheError::AlreadyInitialized));
	let err = cache
		.initialize_from_bindings(allocator.clone(), &[ResourceBindingDesc::new(0, 0, 1, ResourceKind::UniformBuffer)])
		.unwrap_err();
	assert!(matches!(err, ResourceCacheError::AlreadyInitialized));

	assert_eq!(allocator.allocations(), 1);
	assert_eq!(cache.num_sets(), 2);
	assert_eq!(cache.descriptor_set(0).size(), 2);
	assert_eq!(cache.descriptor_set(1).size(), 3);
	assert_eq!(cache.resource(1, 2).kind(), Some(ResourceKind::StorageImage));
	Ok(())
}

#[test]
fn test_kind_survives_rebinding() -> anyhow::Result<()> {
	let mut cache = ShaderResourceCache::<Null>::new();
	cache.initialize_sets(CountingAllocator::new(), &[5])?;
	cache.initialize_resources(0, 1, 3, ResourceKind::SampledImage);

	for slot in 0..5 {
		let expected = (1..4).contains(&slot).then_some(ResourceKind::SampledImage);
		assert_eq!(cache.resource(0, slot).kind(), expected);
		assert!(!cache.resource(0, slot).is_bound());
	}

	let texture = Texture::<Null>::new("albedo", (), ImageAccess::Undefined);
	cache.set_resource(0, 2, Some(TextureView::new("albedo view", (), texture.clone()).into()))?;
	let previous = cache.set_resource(0, 2, None)?;
	assert!(previous.is_some());

	let sampler = Sampler::<Null>::new("linear", ());
	let err = cache.set_resource(0, 2, Some(sampler.into())).unwrap_err();
	assert!(matches!(err, ResourceCacheError::IncompatibleResource { kind: ResourceKind::SampledImage, .. }));

	let buffer = Buffer::<Null>::new("stray", (), 16, BufferAccess::Undefined);
	let err = cache.set_resource(0, 0, Some(buffer.into())).unwrap_err();
	assert!(matches!(err, ResourceCacheError::UninitializedResource { .. }));

	for slot in 1..4 {
		assert_eq!(cache.resource(0, slot).kind(), Some(ResourceKind::SampledImage));
	}
	assert_eq!(cache.resource(0, 0).kind(), None);
	Ok(())
}
