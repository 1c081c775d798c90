//! The core instance: one register file bound to one exclusively owned memory.

use core::fmt;

use crate::{CoreConfig, Flag, Memory, Register, RegisterFile, TraceSink};

/// A single 16-bit CPU core.
///
/// Instruction methods live in [`crate::execute`]; each returns a
/// [`crate::Trap`] and never panics on guest-controlled input.
pub struct Cpu {
    pub(crate) registers: RegisterFile,
    pub(crate) memory: Memory,
    config: CoreConfig,
    trace_sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("registers", &self.registers)
            .field("memory_capacity", &self.memory.capacity())
            .field("config", &self.config)
            .field("trace_sink", &self.trace_sink.is_some())
            .finish()
    }
}

impl Cpu {
    /// Binds a new core to `memory` with all registers zeroed.
    #[must_use]
    pub fn new(memory: Memory) -> Self {
        Self::with_config(memory, &CoreConfig::default())
    }

    /// Binds a new core to `memory` using an explicit configuration.
    #[must_use]
    pub fn with_config(memory: Memory, config: &CoreConfig) -> Self {
        Self {
            registers: RegisterFile::new(),
            memory,
            config: config.clone(),
            trace_sink: None,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Installs the sink that receives trace events while tracing is enabled.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.trace_sink = Some(sink);
    }

    pub(crate) fn trace_sink_mut(&mut self) -> Option<&mut (dyn TraceSink + 'static)> {
        if self.config.tracing_enabled {
            self.trace_sink.as_deref_mut()
        } else {
            None
        }
    }

    /// Register file.
    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Mutable register file, for drivers and test setup.
    pub const fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    /// Memory owned by this core.
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable memory, for loaders and test setup.
    pub const fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Releases the memory, consuming the core.
    #[must_use]
    pub fn into_memory(self) -> Memory {
        self.memory
    }

    /// Reads a register.
    #[must_use]
    pub const fn read(&self, reg: Register) -> u16 {
        self.registers.read(reg)
    }

    /// Replaces a register value.
    pub const fn write(&mut self, reg: Register, value: u16) {
        self.registers.write(reg, value);
    }

    /// Reads one flag bit.
    #[must_use]
    pub const fn read_flag(&self, flag: Flag) -> bool {
        self.registers.flag(flag)
    }

    /// Writes one flag bit, preserving the rest of `FLAG`.
    pub const fn write_flag(&mut self, flag: Flag, enabled: bool) {
        self.registers.set_flag(flag, enabled);
    }
}
