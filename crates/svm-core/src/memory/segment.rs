//! Segment:offset address formation used by stack and string instructions.

use crate::MemoryAddress;

/// Left shift applied to a segment value (`segment * 16`).
pub const SEGMENT_SHIFT: u32 = 4;

/// Computes the physical address `segment * 16 + offset`.
///
/// The result is not wrapped to 20 bits: addresses above the 1 MiB capacity
/// are left for the memory bounds check to reject.
#[must_use]
pub const fn segmented_address(segment: u16, offset: u16) -> MemoryAddress {
    ((segment as u32) << SEGMENT_SHIFT) + offset as u32
}
