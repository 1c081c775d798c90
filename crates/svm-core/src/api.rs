//! Host-facing configuration, trace hooks and snapshot types.

use thiserror::Error;

use crate::{Cpu, Memory, Mnemonic, RegisterFile, Trap, MEMORY_CAPACITY};

/// Top-level immutable configuration for a core instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Enables trace callback dispatch to the installed [`TraceSink`].
    pub tracing_enabled: bool,
}

/// Trace events emitted around each dispatched instruction when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// Emitted before the instruction touches any state.
    InstructionStart {
        /// Mnemonic being executed.
        mnemonic: Mnemonic,
        /// `FLAG` before execution.
        flags: u16,
    },
    /// Emitted after the instruction returns.
    InstructionCompleted {
        /// Mnemonic that was executed.
        mnemonic: Mnemonic,
        /// Status returned to the driver.
        trap: Trap,
        /// `FLAG` after execution.
        flags: u16,
    },
}

/// Sink trait for trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Stable snapshot schema identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u16)]
pub enum SnapshotVersion {
    /// Registers plus the full 1 MiB memory image.
    V1 = 1,
}

/// Reasons a snapshot cannot be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SnapshotError {
    /// Memory image length differs from the fixed capacity.
    #[error("memory image is {actual} bytes, expected {expected}")]
    MemorySize {
        /// Length found in the snapshot.
        actual: usize,
        /// Required length.
        expected: usize,
    },
}

/// Serializable copy of a core's architectural state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreSnapshot {
    /// Snapshot schema version.
    pub version: SnapshotVersion,
    /// All fourteen registers.
    pub registers: RegisterFile,
    /// Raw memory image.
    pub memory: Box<[u8]>,
}

impl CoreSnapshot {
    /// Captures registers and memory from a core.
    #[must_use]
    pub fn from_cpu(version: SnapshotVersion, cpu: &Cpu) -> Self {
        Self {
            version,
            registers: *cpu.registers(),
            memory: cpu.memory().as_bytes().into(),
        }
    }

    /// Rebuilds a core from this snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::MemorySize`] when the memory image is not
    /// exactly the fixed capacity.
    pub fn restore(self, config: &CoreConfig) -> Result<Cpu, SnapshotError> {
        let actual = self.memory.len();
        let memory = Memory::from_image(self.memory).ok_or(SnapshotError::MemorySize {
            actual,
            expected: MEMORY_CAPACITY,
        })?;
        let mut cpu = Cpu::with_config(memory, config);
        *cpu.registers_mut() = self.registers;
        Ok(cpu)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, CoreSnapshot, SnapshotError, SnapshotVersion};
    use crate::{Cpu, Memory, Register, MEMORY_CAPACITY};

    #[test]
    fn default_core_config_disables_tracing() {
        assert!(!CoreConfig::default().tracing_enabled);
    }

    #[test]
    fn snapshot_restores_registers_and_memory() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Sp, 0xFFFE);
        cpu.write(Register::Flag, 0x0801);
        cpu.memory_mut().write_word(0x2000, 0x1234).expect("in bounds");

        let snapshot = CoreSnapshot::from_cpu(SnapshotVersion::V1, &cpu);
        let restored = snapshot
            .restore(&CoreConfig::default())
            .expect("snapshot should restore");

        assert_eq!(restored.registers(), cpu.registers());
        assert_eq!(restored.memory(), cpu.memory());
    }

    #[test]
    fn snapshot_with_truncated_memory_is_rejected() {
        let cpu = Cpu::new(Memory::new());
        let mut snapshot = CoreSnapshot::from_cpu(SnapshotVersion::V1, &cpu);
        snapshot.memory = vec![0; 64].into_boxed_slice();

        let err = snapshot
            .restore(&CoreConfig::default())
            .expect_err("short image must be rejected");
        assert_eq!(
            err,
            SnapshotError::MemorySize {
                actual: 64,
                expected: MEMORY_CAPACITY,
            }
        );
    }
}
