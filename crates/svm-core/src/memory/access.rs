//! Deterministic bounds checks for physical memory accesses.

use core::ops::Range;

use crate::FaultCode;

/// Canonical byte width for 16-bit accesses.
pub const WORD_ACCESS_BYTES: u8 = 2;

/// Width of a single memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessWidth {
    /// One byte.
    Byte,
    /// Two consecutive bytes, most significant first.
    Word,
}

impl AccessWidth {
    /// Number of bytes touched by this width.
    #[must_use]
    pub const fn bytes(self) -> u8 {
        match self {
            Self::Byte => 1,
            Self::Word => WORD_ACCESS_BYTES,
        }
    }
}

/// Validates that every byte of an access lies below `capacity`.
///
/// The check happens before the caller touches any byte, so a failed access
/// never reads or writes partially.
///
/// # Errors
///
/// Returns [`FaultCode::SegFault`] when the last byte of the access is at or
/// beyond `capacity`, including when `addr + width` overflows.
pub fn validate_access(
    addr: u32,
    width: AccessWidth,
    capacity: usize,
) -> Result<Range<usize>, FaultCode> {
    let start = usize::try_from(addr).map_err(|_| FaultCode::SegFault)?;
    let end = start
        .checked_add(usize::from(width.bytes()))
        .ok_or(FaultCode::SegFault)?;
    if end <= capacity {
        Ok(start..end)
    } else {
        Err(FaultCode::SegFault)
    }
}
