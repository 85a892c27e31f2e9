use crate::descriptor::{BoundObjectType, Buffer, BufferView, ResourceKind, Sampler, Texture, TextureView};
use crate::platform::ResourcePlatform;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// A shared reference to an object bound to a [`Resource`] slot. Binding keeps the object alive until it is replaced,
/// cleared or the owning cache is dropped.
pub enum BoundObject<P: ResourcePlatform> {
	Buffer(Arc<Buffer<P>>),
	BufferView(Arc<BufferView<P>>),
	TextureView(Arc<TextureView<P>>),
	Sampler(Arc<Sampler<P>>),
}

impl<P: ResourcePlatform> BoundObject<P> {
	pub fn object_type(&self) -> BoundObjectType {
		match self {
			BoundObject::Buffer(_) => BoundObjectType::Buffer,
			BoundObject::BufferView(_) => BoundObjectType::BufferView,
			BoundObject::TextureView(_) => BoundObjectType::TextureView,
			BoundObject::Sampler(_) => BoundObjectType::Sampler,
		}
	}

	pub fn name(&self) -> &str {
		match self {
			BoundObject::Buffer(b) => b.name(),
			BoundObject::BufferView(b) => b.name(),
			BoundObject::TextureView(t) => t.name(),
			BoundObject::Sampler(s) => s.name(),
		}
	}

	/// The buffer owning the access state, looking through buffer views.
	#[inline]
	pub fn buffer(&self) -> Option<&Arc<Buffer<P>>> {
		match self {
			BoundObject::Buffer(b) => Some(b),
			BoundObject::BufferView(b) => Some(b.buffer()),
			_ => None,
		}
	}

	/// The texture owning the access state, looking through texture views.
	#[inline]
	pub fn texture(&self) -> Option<&Arc<Texture<P>>> {
		match self {
			BoundObject::TextureView(t) => Some(t.texture()),
			_ => None,
		}
	}
}

impl<P: ResourcePlatform> Clone for BoundObject<P> {
	fn clone(&self) -> Self {
		match self {
			BoundObject::Buffer(b) => BoundObject::Buffer(b.clone()),
			BoundObject::BufferView(b) => BoundObject::BufferView(b.clone()),
			BoundObject::TextureView(t) => BoundObject::TextureView(t.clone()),
			BoundObject::Sampler(s) => BoundObject::Sampler(s.clone()),
		}
	}
}

impl<P: ResourcePlatform> Debug for BoundObject<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("BoundObject")
			.field(&self.object_type())
			.field(&self.name())
			.finish()
	}
}

macro_rules! bound_object_from {
	($($variant:ident),*) => {
		$(
			impl<P: ResourcePlatform> From<Arc<$variant<P>>> for BoundObject<P> {
				fn from(value: Arc<$variant<P>>) -> Self {
					BoundObject::$variant(value)
				}
			}
		)*
	};
}

bound_object_from!(Buffer, BufferView, TextureView, Sampler);

/// The position of a [`Resource`] slot within a [`ShaderResourceCache`].
///
/// [`ShaderResourceCache`]: crate::descriptor::ShaderResourceCache
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ResourceLocation {
	pub set: u32,
	pub slot: u32,
}

impl Display for ResourceLocation {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "(set {}, slot {})", self.set, self.slot)
	}
}

/// A single shader visible binding slot.
///
/// A slot starts out unclassified and receives its [`ResourceKind`] once, when shader reflection initializes it. Only
/// the bound object may change afterward.
pub struct Resource<P: ResourcePlatform> {
	kind: Option<ResourceKind>,
	object: Option<BoundObject<P>>,
}

impl<P: ResourcePlatform> Resource<P> {
	pub(crate) const fn unclassified() -> Self {
		Self {
			kind: None,
			object: None,
		}
	}

	/// The kind of this slot, or `None` if it was never initialized.
	#[inline]
	pub fn kind(&self) -> Option<ResourceKind> {
		self.kind
	}

	#[inline]
	pub fn object(&self) -> Option<&BoundObject<P>> {
		self.object.as_ref()
	}

	#[inline]
	pub fn is_bound(&self) -> bool {
		self.object.is_some()
	}

	pub(crate) fn classify(&mut self, kind: ResourceKind) {
		debug_assert!(
			self.kind.is_none(),
			"Resource already initialized as {:?}, cannot initialize it again as {:?}",
			self.kind,
			kind
		);
		self.kind = Some(kind);
	}

	/// Replace the bound object, returning the previously bound one. `None` clears the slot.
	pub(crate) fn bind(&mut self, object: Option<BoundObject<P>>) -> Result<Option<BoundObject<P>>, BindError> {
		let kind = self.kind.ok_or(BindError::Unclassified)?;
		if let Some(object) = &object {
			if object.object_type() != kind.object_type() {
				return Err(BindError::Incompatible {
					kind,
					object_type: object.object_type(),
				});
			}
		}
		Ok(std::mem::replace(&mut self.object, object))
	}
}

impl<P: ResourcePlatform> Debug for Resource<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Resource")
			.field("kind", &self.kind)
			.field("object", &self.object)
			.finish()
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum BindError {
	Unclassified,
	Incompatible {
		kind: ResourceKind,
		object_type: BoundObjectType,
	},
}
