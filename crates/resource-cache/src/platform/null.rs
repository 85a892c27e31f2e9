use crate::platform::ResourcePlatform;

/// A platform without any native handles. Useful to validate bindings and resource states purely on the CPU, e.g. in
/// headless tools and tests.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Null;

impl ResourcePlatform for Null {
	type Buffer = ();
	type BufferView = ();
	type Image = ();
	type ImageView = ();
	type Sampler = ();
}
