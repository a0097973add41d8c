//! Decode flags.

use std::ops::BitOr;

/// Flags passed unchanged through every nested decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastFlags(u8);

impl CastFlags {
    pub const NONE: CastFlags = CastFlags(0);
    /// Permit implicit conversions (int to float, bool to int, class
    /// implicit constructors).
    pub const CONVERT: CastFlags = CastFlags(1);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: CastFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CastFlags {
    type Output = CastFlags;

    fn bitor(self, rhs: CastFlags) -> CastFlags {
        CastFlags(self.0 | rhs.0)
    }
}
