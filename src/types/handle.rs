use std::fmt;
use std::sync::Arc;

/// Stable integer identifying a handle: its creation index within a registry.
///
/// Ids `0..len` belong to registered handles. Ids at or above the registry
/// length are handed out to engine handles the registry never saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub(crate) u32);

impl HandleId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An opaque engine value paired with the id it was registered under.
///
/// The wrapped value is never inspected. Two handles are equal only when they
/// point at the same engine allocation, even if the engine values would
/// compare equal structurally.
pub struct Handle<T> {
    id: HandleId,
    raw: Arc<T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(id: HandleId, raw: Arc<T>) -> Self {
        Self { id, raw }
    }

    #[must_use]
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// The engine's own value, for handing back to the engine.
    #[must_use]
    pub fn raw(&self) -> &Arc<T> {
        &self.raw
    }

    /// Whether this handle wraps exactly `raw`.
    #[must_use]
    pub fn is(&self, raw: &Arc<T>) -> bool {
        Arc::ptr_eq(&self.raw, raw)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            raw: Arc::clone(&self.raw),
        }
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.raw, &other.raw)
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.id)
    }
}

/// Address of the engine allocation behind `raw`, used as an identity key.
pub(crate) fn identity<T>(raw: &Arc<T>) -> usize {
    Arc::as_ptr(raw).cast::<()>() as usize
}
