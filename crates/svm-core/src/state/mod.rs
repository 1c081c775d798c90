//! Architectural register and flag model.

/// Flag identifiers and bit positions inside `FLAG`.
pub mod flags;
/// Register identifiers and the register file.
pub mod registers;

pub use flags::{Flag, FLAGS_LAHF_MASK};
pub use registers::{ByteRegister, Register, RegisterFile, REGISTER_COUNT};
