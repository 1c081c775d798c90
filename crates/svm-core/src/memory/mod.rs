//! Flat bounds-checked byte store and physical address helpers.

/// Bounds validation for byte and word accesses.
pub mod access;
/// Segment:offset physical address computation.
pub mod segment;

pub use access::{validate_access, AccessWidth, WORD_ACCESS_BYTES};
pub use segment::{segmented_address, SEGMENT_SHIFT};

use crate::FaultCode;

/// Size in bytes of the physical address space (1 MiB, 20 address bits).
pub const MEMORY_CAPACITY: usize = 1 << 20;

/// Physical byte offset into [`Memory`].
pub type MemoryAddress = u32;

/// Fixed-capacity byte store owned by one core.
///
/// Every access is validated against [`MEMORY_CAPACITY`] before any byte is
/// touched. Words are two consecutive bytes packed most-significant first and
/// need not be aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Allocates a zeroed 1 MiB store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; MEMORY_CAPACITY].into_boxed_slice(),
        }
    }

    /// Wraps an existing image; `None` unless it is exactly [`MEMORY_CAPACITY`] bytes.
    #[must_use]
    pub fn from_image(bytes: Box<[u8]>) -> Option<Self> {
        (bytes.len() == MEMORY_CAPACITY).then_some(Self { bytes })
    }

    /// Number of addressable bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Raw view of the whole store.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads the big-endian word at `addr..=addr + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::SegFault`] when `addr + 1` is not below capacity.
    pub fn read_word(&self, addr: MemoryAddress) -> Result<u16, FaultCode> {
        let range = validate_access(addr, AccessWidth::Word, self.capacity())?;
        let bytes = &self.bytes[range];
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads the byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::SegFault`] when `addr` is not below capacity.
    pub fn read_byte(&self, addr: MemoryAddress) -> Result<u8, FaultCode> {
        let range = validate_access(addr, AccessWidth::Byte, self.capacity())?;
        Ok(self.bytes[range.start])
    }

    /// Writes `value` big-endian at `addr..=addr + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::SegFault`] without touching memory when `addr + 1`
    /// is not below capacity.
    pub fn write_word(&mut self, addr: MemoryAddress, value: u16) -> Result<(), FaultCode> {
        let range = validate_access(addr, AccessWidth::Word, self.capacity())?;
        self.bytes[range].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    /// Writes one byte at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::SegFault`] without touching memory when `addr` is
    /// not below capacity.
    pub fn write_byte(&mut self, addr: MemoryAddress, value: u8) -> Result<(), FaultCode> {
        let range = validate_access(addr, AccessWidth::Byte, self.capacity())?;
        self.bytes[range.start] = value;
        Ok(())
    }

    /// Copies a program or data image to `base`, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::SegFault`] without touching memory when any byte of
    /// the image would land outside capacity.
    pub fn load(&mut self, base: MemoryAddress, image: &[u8]) -> Result<(), FaultCode> {
        let start = usize::try_from(base).map_err(|_| FaultCode::SegFault)?;
        let end = start
            .checked_add(image.len())
            .filter(|end| *end <= self.capacity())
            .ok_or(FaultCode::SegFault)?;
        self.bytes[start..end].copy_from_slice(image);
        Ok(())
    }
}
