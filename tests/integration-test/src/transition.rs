#![cfg(test)]

use crate::CountingAllocator;
use gpu_resource_cache::descriptor::{
	Buffer, BufferView, ResourceBindingDesc, ResourceKind, ShaderResourceCache, Texture, TextureView,
};
use gpu_resource_cache::pipeline::{
	BufferAccess, CommitShaderResourcesFlags, ImageAccess, TransitionLog, TransitionMode, TransitionRequest,
	TransitionSummary,
};
use gpu_resource_cache::platform::Null;
use std::sync::Arc;

#[test]
fn test_uniform_buffer_and_sampled_image() -> anyhow::Result<()> {
	let mut cache = ShaderResourceCache::<Null>::new();
	cache.initialize_sets(CountingAllocator::new(), &[2])?;
	cache.initialize_resources(0, 0, 1, ResourceKind::UniformBuffer);
	cache.initialize_resources(0, 1, 1, ResourceKind::SampledImage);

	let buffer = Buffer::<Null>::new("camera", (), 256, BufferAccess::Undefined);
	let texture = Texture::<Null>::new("albedo", (), ImageAccess::Undefined);
	cache.set_resource(0, 0, Some(buffer.clone().into()))?;
	cache.set_resource(0, 1, Some(TextureView::new("albedo view", (), texture.clone()).into()))?;

	let mut log = TransitionLog::new();
	let summary = cache.transition_resources(TransitionMode::Apply, &mut log)?;
	assert_eq!(
		summary,
		TransitionSummary {
			barriers: 1,
			layout_transitions: 1,
			mismatches: 0,
		}
	);
	assert_eq!(buffer.access(), BufferAccess::UniformRead);
	assert_eq!(texture.access(), ImageAccess::SampledRead);

	match log.requests() {
		[TransitionRequest::MemoryBarrier {
			buffer: barrier_buffer,
			src: BufferAccess::Undefined,
			dst: BufferAccess::UniformRead,
		}, TransitionRequest::LayoutTransition {
			texture: transition_texture,
			src: ImageAccess::Undefined,
			dst: ImageAccess::SampledRead,
		}] => {
			assert!(Arc::ptr_eq(barrier_buffer, &buffer));
			assert!(Arc::ptr_eq(transition_texture, &texture));
		}
		requests => panic!("unexpected transition requests: {:?}", requests),
	}

	let mut verify = TransitionLog::new();
	let summary = cache.transition_resources(TransitionMode::Verify, &mut verify)?;
	assert!(summary.is_clean());
	assert!(verify.is_empty());
	Ok(())
}

#[test]
fn test_second_apply_is_idempotent() -> anyhow::Result<()> {
	let cache = scene()?;

	let mut log = TransitionLog::new();
	let first = cache.transition_resources(TransitionMode::Apply, &mut log)?;
	assert!(first.transitions() > 0);
	log.clear();

	let second = cache.transition_resources(TransitionMode::Apply, &mut log)?;
	assert_eq!(second, TransitionSummary::default());
	assert!(log.is_empty());
	Ok(())
}

#[test]
fn test_verify_reports_exactly_what_apply_transitions() -> anyhow::Result<()> {
	let cache = scene()?;

	let mut verify = TransitionLog::new();
	let verified = cache.transition_resources(TransitionMode::Verify, &mut verify)?;
	let mut apply = TransitionLog::new();
	let applied = cache.transition_resources(TransitionMode::Apply, &mut apply)?;

	// "lights" is bound twice: verify reports both slots, apply transitions it once at its first slot
	assert_eq!(verified.mismatches, 5);
	assert_eq!(applied.transitions(), 4);
	let mut reported = Vec::new();
	for name in verify.mismatches().iter().map(|m| m.name()) {
		if !reported.contains(&name) {
			reported.push(name);
		}
	}
	let transitioned = apply.requests().iter().map(TransitionRequest::name).collect::<Vec<_>>();
	assert_eq!(reported, transitioned);
	assert_eq!(transitioned, ["lights", "shadow map", "lut", "output"]);
	Ok(())
}

#[test]
fn test_commit_flags() -> anyhow::Result<()> {
	let cache = scene()?;

	let mut log = TransitionLog::new();
	let summary = cache.commit_resources(CommitShaderResourcesFlags::VERIFY_STATES, &mut log)?;
	assert!(summary.mismatches > 0);
	assert!(log.requests().is_empty());

	let summary = cache.commit_resources(
		CommitShaderResourcesFlags::TRANSITION_RESOURCES | CommitShaderResourcesFlags::VERIFY_STATES,
		&mut log,
	)?;
	assert_eq!(summary.mismatches, 0);
	assert!(summary.transitions() > 0);

	let summary = cache.commit_resources(CommitShaderResourcesFlags::VERIFY_STATES, &mut log)?;
	assert!(summary.is_clean());
	Ok(())
}

/// A material pipeline layout with a few already correct and a few mismatching resources, including one buffer bound
/// to two sets.
fn scene() -> anyhow::Result<ShaderResourceCache<Null>> {
	let bindings = [
		ResourceBindingDesc::new(0, 0, 1, ResourceKind::UniformBuffer),
		ResourceBindingDesc::new(0, 1, 1, ResourceKind::StorageBuffer),
		ResourceBindingDesc::new(1, 0, 2, ResourceKind::SampledImage),
		ResourceBindingDesc::new(1, 2, 1, ResourceKind::UniformTexelBuffer),
		ResourceBindingDesc::new(2, 0, 1, ResourceKind::StorageBuffer),
		ResourceBindingDesc::new(2, 1, 1, ResourceKind::StorageImage),
	];
	let mut cache = ShaderResourceCache::<Null>::new();
	cache.initialize_from_bindings(CountingAllocator::new(), &bindings)?;

	let camera = Buffer::<Null>::new("camera", (), 256, BufferAccess::UniformRead);
	let lights = Buffer::<Null>::new("lights", (), 4096, BufferAccess::TransferWrite);
	let albedo = Texture::<Null>::new("albedo", (), ImageAccess::SampledRead);
	let shadow_map = Texture::<Null>::new("shadow map", (), ImageAccess::DepthStencilAttachment);
	let lut = Buffer::<Null>::new("lut", (), 1024, BufferAccess::TransferWrite);
	let output = Texture::<Null>::new("output", (), ImageAccess::Undefined);

	cache.set_resource(0, 0, Some(camera.into()))?;
	cache.set_resource(0, 1, Some(lights.clone().into()))?;
	cache.set_resource(1, 0, Some(TextureView::new("albedo view", (), albedo).into()))?;
	cache.set_resource(1, 1, Some(TextureView::new("shadow map view", (), shadow_map).into()))?;
	cache.set_resource(1, 2, Some(BufferView::new("lut view", (), lut).into()))?;
	cache.set_resource(2, 0, Some(lights.into()))?;
	cache.set_resource(2, 1, Some(TextureView::new("output view", (), output).into()))?;

	Ok(cache)
}
