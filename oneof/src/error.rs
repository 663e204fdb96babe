use crate::OneOf;

/// Returned by exhaustive dispatch (`map`, `visit`) when no slot is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no variant of `{owner}` is occupied, expected one of: {}", .expected.join(", "))]
pub struct NoVariantOccupied {
    owner: &'static str,
    expected: &'static [&'static str],
}

impl NoVariantOccupied {
    /// An error for `owner`, whose slots hold the payload types named in `expected`.
    pub const fn new(owner: &'static str, expected: &'static [&'static str]) -> Self {
        Self { owner, expected }
    }

    /// The error for an all-absent `T`.
    pub const fn of<T: OneOf + ?Sized>() -> Self {
        Self::new(T::NAME, T::PAYLOAD_TYPES)
    }

    /// Full path of the type that was dispatched on.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Payload type names of the slots, in declaration order.
    pub fn expected(&self) -> &'static [&'static str] {
        self.expected
    }
}
