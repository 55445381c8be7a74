use crate::error::Result;

use super::table::Instruction;
use super::{Bus, Cpu, Decoded};

/// Outcome of a single [`Cpu::step`].
#[derive(Clone, Copy, Debug)]
pub enum Step {
    /// One instruction ran to completion.
    Executed(&'static Instruction),
    /// The CPU is halted; nothing was fetched.
    Halted,
    /// The CPU is stopped; nothing was fetched.
    Stopped,
}

impl Cpu {
    /// Execute a single instruction.
    ///
    /// Fetch, decode, execute and flag update happen as one atomic step.
    /// A halted or stopped CPU does nothing until [`Cpu::wake`].
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<Step> {
        if self.stopped {
            return Ok(Step::Stopped);
        }
        if self.halted {
            return Ok(Step::Halted);
        }

        let decoded = self.decode(bus)?;
        log::trace!("{:04X}: {}", decoded.pc, decoded.instruction);
        self.execute(bus, &decoded);

        Ok(Step::Executed(decoded.instruction))
    }

    /// Run a decoded instruction's routine and apply its flag policy.
    ///
    /// Also advances a pending EI, so `decode` + `execute` behaves like
    /// [`Cpu::step`].
    pub fn execute<B: Bus>(&mut self, bus: &mut B, decoded: &Decoded) {
        let instruction = decoded.instruction;
        let before = self.regs.f;

        (instruction.exec)(self, bus, &decoded.args);

        self.regs.f = instruction.flags.apply(before, self.regs.f);
        self.apply_ime_delay();
    }
}
