mod alu;
mod bus;
mod cb;
mod decode;
mod exec;
mod helpers;
mod ime;
mod init;
pub mod operand;
mod regs;
mod step;
pub mod table;

pub use bus::Bus;
pub use decode::Decoded;
pub use operand::{Arg, Args, Operand};
pub use regs::{Condition, Flags, Reg16, Reg8, Registers};
pub use step::Step;
pub use table::{FlagEffect, FlagPolicy, Instruction, InstructionTable, Mnemonic};

/// Game Boy CPU core.
///
/// Owns the register file, the flags and the small amount of control state
/// that instructions themselves change (IME, HALT, STOP). Memory lives
/// behind a [`Bus`] passed into every step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. Only the host can leave it, via [`Cpu::wake`].
    pub stopped: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flags) -> bool {
        self.regs.f.contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.regs.f.set(flag, value);
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = Flags::empty();
    }
}
