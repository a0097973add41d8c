//! Return value policies for native-to-host encoding.

/// Ownership policy requested by the caller of an encode. A dict encode
/// applies the same policy to every key and element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RvPolicy {
    #[default]
    Automatic,
    AutomaticReference,
    TakeOwnership,
    Copy,
    Move,
    Reference,
    ReferenceInternal,
    None,
}

/// How a native value ends up inside a host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Copy,
    Move,
}

impl RvPolicy {
    /// Resolution when the encoder only has a borrow of the value. Nothing
    /// can be moved out of a borrow, and the host cannot hold a Rust
    /// reference, so the reference policies are refused.
    pub fn for_borrowed(self) -> Option<Transfer> {
        match self {
            RvPolicy::Automatic
            | RvPolicy::AutomaticReference
            | RvPolicy::Copy
            | RvPolicy::Move => Some(Transfer::Copy),
            RvPolicy::TakeOwnership
            | RvPolicy::Reference
            | RvPolicy::ReferenceInternal
            | RvPolicy::None => None,
        }
    }

    /// Resolution when the encoder owns the value.
    pub fn for_owned(self) -> Option<Transfer> {
        match self {
            RvPolicy::Automatic
            | RvPolicy::AutomaticReference
            | RvPolicy::TakeOwnership
            | RvPolicy::Move => Some(Transfer::Move),
            RvPolicy::Copy => Some(Transfer::Copy),
            RvPolicy::Reference | RvPolicy::ReferenceInternal | RvPolicy::None => None,
        }
    }
}
