use gpu_resource_cache::backing::{DefaultMemoryAllocator, MemoryAllocator};
use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub mod layout;
pub mod teardown;
pub mod transition;

/// A [`MemoryAllocator`] forwarding to [`DefaultMemoryAllocator`] which counts the live allocations and bytes, to
/// detect leaks and double frees.
#[derive(Debug, Default)]
pub struct CountingAllocator {
	allocations: AtomicUsize,
	frees: AtomicUsize,
	live_bytes: AtomicUsize,
}

impl CountingAllocator {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn allocations(&self) -> usize {
		self.allocations.load(Ordering::Relaxed)
	}

	pub fn frees(&self) -> usize {
		self.frees.load(Ordering::Relaxed)
	}

	pub fn live_bytes(&self) -> usize {
		self.live_bytes.load(Ordering::Relaxed)
	}
}

impl MemoryAllocator for CountingAllocator {
	fn allocate(&self, layout: Layout, dbg_name: &str) -> NonNull<u8> {
		self.allocations.fetch_add(1, Ordering::Relaxed);
		self.live_bytes.fetch_add(layout.size(), Ordering::Relaxed);
		DefaultMemoryAllocator.allocate(layout, dbg_name)
	}

	unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
		self.frees.fetch_add(1, Ordering::Relaxed);
		self.live_bytes.fetch_sub(layout.size(), Ordering::Relaxed);
		unsafe { DefaultMemoryAllocator.free(ptr, layout) }
	}
}
