//! Software 16-bit x86-style CPU core.
//!
//! A [`Cpu`] owns a [`RegisterFile`] and a 1 MiB [`Memory`] and executes
//! [`Instruction`]s by direct method call. Every instruction returns a
//! [`Trap`]; guest-controlled input never panics the core.

/// Fault taxonomy and instruction status codes.
pub mod fault;
pub use fault::{FaultCode, Trap};

/// Bounds-checked byte store and segmented addressing.
pub mod memory;
pub use memory::{
    segmented_address, validate_access, AccessWidth, Memory, MemoryAddress, MEMORY_CAPACITY,
    SEGMENT_SHIFT, WORD_ACCESS_BYTES,
};

/// Architectural register and flag model.
pub mod state;
pub use state::{ByteRegister, Flag, Register, RegisterFile, FLAGS_LAHF_MASK, REGISTER_COUNT};

/// Mnemonics, operands and instruction values.
pub mod instruction;
pub use instruction::{Instruction, Mnemonic, Operand, MNEMONIC_COUNT};

/// Core instance binding registers to memory.
pub mod cpu;
pub use cpu::Cpu;

/// Instruction semantics and the shared ALU.
pub mod execute;
pub use execute::{AluOutput, ArithOp, FlagsUpdate, Width};

/// Public host-facing configuration, tracing and snapshot types.
pub mod api;
pub use api::{CoreConfig, CoreSnapshot, SnapshotError, SnapshotVersion, TraceEvent, TraceSink};

