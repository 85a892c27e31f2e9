use crate::descriptor::ResourceKind;
use std::ops::Index;

/// Number of binding slots per [`ResourceKind`], e.g. to size descriptor pools.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DescriptorCounts {
	counts: [u32; ResourceKind::COUNT],
}

impl DescriptorCounts {
	pub fn add(&mut self, kind: ResourceKind, count: u32) {
		self.counts[kind.to_usize()] += count;
	}

	pub fn total(&self) -> u32 {
		self.counts.iter().sum()
	}

	pub fn is_empty(&self) -> bool {
		self.total() == 0
	}

	/// Iterate all kinds with a non-zero count.
	pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
		ResourceKind::ALL
			.into_iter()
			.map(|kind| (kind, self[kind]))
			.filter(|(_, count)| *count != 0)
	}
}

impl Index<ResourceKind> for DescriptorCounts {
	type Output = u32;

	fn index(&self, kind: ResourceKind) -> &Self::Output {
		&self.counts[kind.to_usize()]
	}
}

impl FromIterator<ResourceKind> for DescriptorCounts {
	fn from_iter<T: IntoIterator<Item = ResourceKind>>(iter: T) -> Self {
		let mut counts = Self::default();
		for kind in iter {
			counts.add(kind, 1);
		}
		counts
	}
}
