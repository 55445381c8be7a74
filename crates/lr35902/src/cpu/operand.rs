use std::fmt;
use std::ops::Deref;

use super::{Condition, Reg16, Reg8};

/// Operand kinds as declared by an instruction descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Reg8(Reg8),
    Reg16(Reg16),
    /// 8-bit immediate; one extra instruction byte.
    Imm8,
    /// 16-bit little-endian immediate; two extra instruction bytes.
    Imm16,
    /// Memory addressed by a register pair, e.g. `(HL)`.
    Indirect(Reg16),
    /// Memory addressed by a 16-bit immediate, `(nn)`.
    IndirectImm16,
    /// `(FF00+n)`, high page addressed by an 8-bit immediate.
    HighImm8,
    /// `(FF00+C)`.
    HighC,
    Condition(Condition),
    /// Bit index for BIT/SET/RES, encoded in the opcode.
    Bit(u8),
    /// RST target, encoded in the opcode.
    Vector(u8),
}

impl Operand {
    /// Number of extra instruction bytes this operand consumes.
    pub const fn extra_bytes(self) -> u8 {
        match self {
            Operand::Imm8 | Operand::HighImm8 => 1,
            Operand::Imm16 | Operand::IndirectImm16 => 2,
            _ => 0,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg8(reg) => write!(f, "{reg}"),
            Operand::Reg16(reg) => write!(f, "{reg}"),
            Operand::Imm8 => f.write_str("n"),
            Operand::Imm16 => f.write_str("nn"),
            Operand::Indirect(reg) => write!(f, "({reg})"),
            Operand::IndirectImm16 => f.write_str("(nn)"),
            Operand::HighImm8 => f.write_str("(n)"),
            Operand::HighC => f.write_str("(C)"),
            Operand::Condition(cc) => write!(f, "{cc}"),
            Operand::Bit(bit) => write!(f, "{bit}"),
            Operand::Vector(vector) => write!(f, "{vector:02X}H"),
        }
    }
}

/// An operand after decoding: immediates fetched, memory operands turned
/// into concrete addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arg {
    Reg8(Reg8),
    Reg16(Reg16),
    Imm8(u8),
    Imm16(u16),
    /// A memory byte (or word, for 16-bit stores) at a fixed address.
    Mem(u16),
    Condition(Condition),
    Bit(u8),
    Vector(u8),
}

/// No LR35902 instruction takes more than two operands once `LD HL,SP+n`
/// is spelled `LDHL SP, n`.
pub const MAX_OPERANDS: usize = 2;

/// Decoded arguments for one instruction, in descriptor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Args {
    values: [Arg; MAX_OPERANDS],
    len: usize,
}

impl Args {
    pub(crate) const fn new() -> Self {
        Self {
            values: [Arg::Imm8(0); MAX_OPERANDS],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, arg: Arg) {
        debug_assert!(self.len < MAX_OPERANDS, "too many operands");
        self.values[self.len] = arg;
        self.len += 1;
    }
}

impl Deref for Args {
    type Target = [Arg];

    fn deref(&self) -> &[Arg] {
        &self.values[..self.len]
    }
}
