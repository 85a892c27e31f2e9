use std::alloc::Layout;
use std::fmt::{Debug, Formatter};
use std::ptr::NonNull;
use std::sync::Arc;

/// Allocator for the CPU side bookkeeping memory of a [`ShaderResourceCache`].
///
/// [`ShaderResourceCache`]: crate::descriptor::ShaderResourceCache
pub trait MemoryAllocator: Send + Sync {
	/// Allocate a block of memory fitting `layout`, which never has a size of zero. `dbg_name` describes what the
	/// memory is used for. Running out of memory is fatal, implementations must never return a dangling or null
	/// pointer and should call [`std::alloc::handle_alloc_error`] instead.
	fn allocate(&self, layout: Layout, dbg_name: &str) -> NonNull<u8>;

	/// Free a block previously returned by [`Self::allocate`].
	///
	/// # Safety
	/// `ptr` must have been allocated by this allocator with the same `layout` and must not be accessed afterward.
	unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout);
}

/// [`MemoryAllocator`] forwarding to the global allocator.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultMemoryAllocator;

impl MemoryAllocator for DefaultMemoryAllocator {
	fn allocate(&self, layout: Layout, _dbg_name: &str) -> NonNull<u8> {
		assert_ne!(layout.size(), 0, "zero-sized allocations are not allowed");
		// Safety: layout is not zero-sized
		let ptr = unsafe { std::alloc::alloc(layout) };
		NonNull::new(ptr).unwrap_or_else(|| std::alloc::handle_alloc_error(layout))
	}

	unsafe fn free(&self, ptr: NonNull<u8>, layout: Layout) {
		unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
	}
}

/// An uninitialized block of memory allocated from some [`MemoryAllocator`], which is returned to it on drop.
///
/// The block does not know what is stored within it, the owner must drop any contents before the block itself is
/// dropped.
pub struct RawBlock {
	ptr: NonNull<u8>,
	layout: Layout,
	allocator: Arc<dyn MemoryAllocator>,
}

// Safety: RawBlock is just memory, the owner is responsible for the thread safety of its contents
unsafe impl Send for RawBlock {}
unsafe impl Sync for RawBlock {}

impl RawBlock {
	/// Allocates a new block from `allocator`. `layout` must not be zero-sized.
	pub fn allocate(allocator: Arc<dyn MemoryAllocator>, layout: Layout, dbg_name: &str) -> Self {
		let ptr = allocator.allocate(layout, dbg_name);
		debug_assert_eq!(
			ptr.as_ptr() as usize % layout.align(),
			0,
			"allocator returned misaligned memory for {}",
			dbg_name
		);
		Self { ptr, layout, allocator }
	}

	#[inline]
	pub fn as_ptr(&self) -> NonNull<u8> {
		self.ptr
	}

	#[inline]
	pub fn layout(&self) -> Layout {
		self.layout
	}

	#[inline]
	pub fn size(&self) -> usize {
		self.layout.size()
	}

	pub fn allocator(&self) -> &Arc<dyn MemoryAllocator> {
		&self.allocator
	}
}

impl Drop for RawBlock {
	fn drop(&mut self) {
		// Safety: ptr and layout came from this very allocator
		unsafe { self.allocator.free(self.ptr, self.layout) }
	}
}

impl Debug for RawBlock {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RawBlock")
			.field("ptr", &self.ptr)
			.field("layout", &self.layout)
			.finish()
	}
}
