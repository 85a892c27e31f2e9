use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::Relaxed;

/// The current access state of a single resource, shared by every binding referencing said resource.
///
/// Updates are atomic, but not synchronized with anything else: the state is logically owned by whichever recording
/// context is about to submit work against the resource, and callers must serialize recording contexts that
/// transition the same resource.
pub struct AccessState<A: Copy + FromPrimitive + ToPrimitive> {
	atomic: AtomicU32,
	_phantom: PhantomData<A>,
}

impl<A: Copy + FromPrimitive + ToPrimitive> AccessState<A> {
	pub fn new(a: A) -> Self {
		Self {
			atomic: AtomicU32::new(Self::a_to_u32(a)),
			_phantom: PhantomData,
		}
	}

	#[inline]
	pub fn load(&self) -> A {
		Self::u32_to_a(self.atomic.load(Relaxed))
	}

	#[inline]
	pub fn store(&self, a: A) {
		self.atomic.store(Self::a_to_u32(a), Relaxed);
	}

	/// Stores `a` and returns the previous state.
	#[inline]
	pub fn swap(&self, a: A) -> A {
		Self::u32_to_a(self.atomic.swap(Self::a_to_u32(a), Relaxed))
	}

	#[inline]
	fn a_to_u32(a: A) -> u32 {
		a.to_u32().expect("access state must fit into u32")
	}

	#[inline]
	fn u32_to_a(i: u32) -> A {
		A::from_u32(i).expect("only valid access states are ever stored")
	}
}

impl<A: Copy + FromPrimitive + ToPrimitive + Debug> Debug for AccessState<A> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("AccessState").field(&self.load()).finish()
	}
}
