use thiserror::Error;

/// Error faults raised by memory accesses and instruction execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Operation or operand shape is not supported by this core.
    #[error("illegal or unimplemented operation")]
    Illegal = 0x01,
    /// Physical address outside the memory capacity.
    #[error("memory address out of bounds")]
    SegFault = 0x02,
    /// Memory error that is not caused by the address itself.
    #[error("memory fault")]
    MemFault = 0x03,
}

impl FaultCode {
    /// Converts a fault code to its stable trap byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable trap byte back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Illegal),
            0x02 => Some(Self::SegFault),
            0x03 => Some(Self::MemFault),
            _ => None,
        }
    }
}

/// Status returned by every instruction.
///
/// `Ok` and `Halt` are not errors; the remaining variants mirror
/// [`FaultCode`] with the same stable byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Trap {
    /// Instruction completed.
    #[default]
    Ok = 0x00,
    /// Operation or operand shape is not supported.
    Illegal = 0x01,
    /// Memory address out of bounds.
    SegFault = 0x02,
    /// Reserved non-addressing memory error.
    MemFault = 0x03,
    /// Execution-stop request from `HLT`.
    Halt = 0x04,
}

impl Trap {
    /// Converts a trap to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a trap.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Ok),
            0x04 => Some(Self::Halt),
            _ => match FaultCode::from_u8(code) {
                Some(fault) => Some(Self::from_fault(fault)),
                None => None,
            },
        }
    }

    /// Lifts an error fault into the trap surface.
    #[must_use]
    pub const fn from_fault(fault: FaultCode) -> Self {
        match fault {
            FaultCode::Illegal => Self::Illegal,
            FaultCode::SegFault => Self::SegFault,
            FaultCode::MemFault => Self::MemFault,
        }
    }

    /// Returns the error part of this trap, if any.
    #[must_use]
    pub const fn fault(self) -> Option<FaultCode> {
        match self {
            Self::Illegal => Some(FaultCode::Illegal),
            Self::SegFault => Some(FaultCode::SegFault),
            Self::MemFault => Some(FaultCode::MemFault),
            Self::Ok | Self::Halt => None,
        }
    }

    /// Returns `true` for traps that report an error.
    #[must_use]
    pub const fn is_fault(self) -> bool {
        self.fault().is_some()
    }

    /// Returns `true` when the driver should stop fetching instructions.
    #[must_use]
    pub const fn stops_execution(self) -> bool {
        !matches!(self, Self::Ok)
    }
}

impl From<FaultCode> for Trap {
    fn from(fault: FaultCode) -> Self {
        Self::from_fault(fault)
    }
}

impl From<Result<(), FaultCode>> for Trap {
    fn from(result: Result<(), FaultCode>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(fault) => Self::from_fault(fault),
        }
    }
}
