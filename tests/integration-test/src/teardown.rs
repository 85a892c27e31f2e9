#![cfg(test)]

use crate::CountingAllocator;
use gpu_resource_cache::descriptor::{
	Buffer, BufferView, ResourceKind, Sampler, ShaderResourceCache, Texture, TextureView,
};
use gpu_resource_cache::pipeline::{BufferAccess, ImageAccess, TransitionLog, TransitionMode};
use gpu_resource_cache::platform::Null;
use std::sync::Arc;

#[test]
fn test_drop_releases_every_binding_once() -> anyhow::Result<()> {
	let allocator = CountingAllocator::new();
	let buffer = Buffer::<Null>::new("instances", (), 2048, BufferAccess::Undefined);
	let texture = Texture::<Null>::new("atlas", (), ImageAccess::Undefined);
	let sampler = Sampler::<Null>::new("nearest", ());
	{
		let mut cache = ShaderResourceCache::<Null>::new();
		cache.initialize_sets(allocator.clone(), &[3, 0, 3])?;
		cache.initialize_resources(0, 0, 2, ResourceKind::StorageBuffer);
		cache.initialize_resources(0, 2, 1, ResourceKind::StorageTexelBuffer);
		cache.initialize_resources(2, 0, 2, ResourceKind::SeparateImage);
		cache.initialize_resources(2, 2, 1, ResourceKind::SeparateSampler);

		cache.set_resource(0, 0, Some(buffer.clone().into()))?;
		cache.set_resource(0, 1, Some(buffer.clone().into()))?;
		cache.set_resource(0, 2, Some(BufferView::new("instances view", (), buffer.clone()).into()))?;
		let view = TextureView::new("atlas view", (), texture.clone());
		cache.set_resource(2, 0, Some(view.clone().into()))?;
		cache.set_resource(2, 1, Some(view.clone().into()))?;
		cache.set_resource(2, 2, Some(sampler.clone().into()))?;

		assert_eq!(Arc::strong_count(&buffer), 4);
		assert_eq!(Arc::strong_count(&view), 3);
		assert_eq!(Arc::strong_count(&sampler), 2);

		// overwriting releases the previous binding immediately
		let scratch = Buffer::<Null>::new("scratch", (), 64, BufferAccess::Undefined);
		cache.set_resource(0, 1, Some(scratch.into()))?;
		assert_eq!(Arc::strong_count(&buffer), 3);
		cache.set_resource(2, 1, Some(TextureView::new("atlas mip view", (), texture.clone()).into()))?;
		assert_eq!(Arc::strong_count(&view), 2);
		assert_eq!(Arc::strong_count(&texture), 3);

		cache.transition_resources(TransitionMode::Apply, &mut TransitionLog::new())?;
		assert_eq!(allocator.allocations(), 1);
		assert_eq!(allocator.frees(), 0);
	}

	assert_eq!(Arc::strong_count(&buffer), 1);
	assert_eq!(Arc::strong_count(&texture), 1);
	assert_eq!(Arc::strong_count(&sampler), 1);
	assert_eq!(allocator.frees(), 1);
	assert_eq!(allocator.live_bytes(), 0);
	Ok(())
}

#[test]
fn test_drop_uninitialized_and_empty() {
	drop(ShaderResourceCache::<Null>::new());

	let allocator = CountingAllocator::new();
	let mut cache = ShaderResourceCache::<Null>::new();
	cache.initialize_sets(allocator.clone(), &[]).unwrap();
	drop(cache);
	assert_eq!(allocator.allocations(), 0);
	assert_eq!(allocator.frees(), 0);

	let mut cache = ShaderResourceCache::<Null>::new();
	cache.initialize_sets(allocator.clone(), &[0, 2]).unwrap();
	drop(cache);
	assert_eq!(allocator.allocations(), 1);
	assert_eq!(allocator.frees(), 1);
}
