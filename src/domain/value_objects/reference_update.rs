//! Patch semantics for optional references.
//!
//! Clients send `null`/absent to leave a reference alone and the nil UUID
//! (`00000000-0000-0000-0000-000000000000`) to clear it.

use uuid::Uuid;

/// What a partial update does to an optional foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceUpdate {
    Keep,
    Clear,
    Set(Uuid),
}

impl ReferenceUpdate {
    /// Interpret a wire value.
    pub fn from_wire(value: Option<Uuid>) -> Self {
        match value {
            None => Self::Keep,
            Some(id) if id.is_nil() => Self::Clear,
            Some(id) => Self::Set(id),
        }
    }

    /// Apply to the current value.
    pub fn apply(self, current: Option<Uuid>) -> Option<Uuid> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(id) => Some(id),
        }
    }

    /// The referenced id that must be checked for existence, if any.
    pub fn target(self) -> Option<Uuid> {
        match self {
            Self::Set(id) => Some(id),
            _ => None,
        }
    }
}
