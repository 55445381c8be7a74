use std::fmt;

use thiserror::Error;

/// Opcode as fetched, including whether it came through the `0xCB` prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Plain(u8),
    Prefixed(u8),
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Plain(op) => write!(f, "0x{op:02X}"),
            Opcode::Prefixed(op) => write!(f, "0xCB 0x{op:02X}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpuError {
    /// The opcode has no table entry. `pc` is the address of the first
    /// opcode byte (the prefix, for prefixed opcodes).
    #[error("unimplemented opcode {opcode} at PC=0x{pc:04X}")]
    UnimplementedOpcode { opcode: Opcode, pc: u16 },
}

pub type Result<T> = std::result::Result<T, CpuError>;
