//! Sharp LR35902 instruction execution engine.
//!
//! [`Cpu::step`] fetches one instruction from a [`Bus`], runs it against
//! the register file and applies the instruction's flag policy. Opcode
//! metadata lives in two static tables, [`cpu::table::primary`] and
//! [`cpu::table::prefixed`], which can also be used on their own for
//! disassembly.

pub mod cpu;
pub mod error;
pub mod memory;

pub use cpu::{Bus, Cpu, Flags, Instruction, Mnemonic, Reg16, Reg8, Registers, Step};
pub use error::{CpuError, Opcode};
pub use memory::Memory;
