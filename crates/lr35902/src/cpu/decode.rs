use crate::error::{CpuError, Opcode, Result};

use super::table::{self, Instruction, PREFIX};
use super::{Arg, Args, Bus, Cpu, Operand, Reg8};

/// An instruction with its operands resolved, ready to execute.
#[derive(Clone, Copy, Debug)]
pub struct Decoded {
    pub instruction: &'static Instruction,
    pub args: Args,
    /// Address of the first instruction byte.
    pub pc: u16,
}

impl Cpu {
    /// Fetch one instruction at PC and resolve its operands.
    ///
    /// PC ends up past the last instruction byte. Memory operands are
    /// turned into addresses here, before the routine runs, so an
    /// instruction that overwrites half of its address pair still uses
    /// the address it started with.
    ///
    /// On an unimplemented opcode PC is put back on the faulting opcode.
    pub fn decode<B: Bus>(&mut self, bus: &mut B) -> Result<Decoded> {
        self.decode_dyn(bus)
    }

    fn decode_dyn(&mut self, bus: &mut dyn Bus) -> Result<Decoded> {
        let pc = self.regs.pc;
        let first = self.fetch8(bus);

        let (instruction, opcode) = if first == PREFIX {
            let second = self.fetch8(bus);
            (table::prefixed().get(second), Opcode::Prefixed(second))
        } else {
            (table::primary().get(first), Opcode::Plain(first))
        };

        let Some(instruction) = instruction else {
            self.regs.pc = pc;
            log::error!(
                "unimplemented opcode {opcode} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                sp = self.regs.sp,
                af = self.regs.af(),
                bc = self.regs.bc(),
                de = self.regs.de(),
                hl = self.regs.hl(),
            );
            return Err(CpuError::UnimplementedOpcode { opcode, pc });
        };

        let mut args = Args::new();
        for &operand in &instruction.operands {
            let arg = self.resolve(bus, operand);
            args.push(arg);
        }

        debug_assert_eq!(
            self.regs.pc.wrapping_sub(pc),
            instruction.size as u16,
            "{instruction} consumed the wrong number of bytes"
        );

        Ok(Decoded {
            instruction,
            args,
            pc,
        })
    }

    fn resolve(&mut self, bus: &mut dyn Bus, operand: Operand) -> Arg {
        match operand {
            Operand::Reg8(reg) => Arg::Reg8(reg),
            Operand::Reg16(reg) => Arg::Reg16(reg),
            Operand::Imm8 => Arg::Imm8(self.fetch8(bus)),
            Operand::Imm16 => Arg::Imm16(self.fetch16(bus)),
            Operand::Indirect(reg) => Arg::Mem(self.regs.get16(reg)),
            Operand::IndirectImm16 => Arg::Mem(self.fetch16(bus)),
            Operand::HighImm8 => Arg::Mem(high_page(self.fetch8(bus))),
            Operand::HighC => Arg::Mem(high_page(self.regs.get8(Reg8::C))),
            Operand::Condition(cc) => Arg::Condition(cc),
            Operand::Bit(bit) => Arg::Bit(bit),
            Operand::Vector(vector) => Arg::Vector(vector),
        }
    }
}

/// Address in the 0xFF00 page.
#[inline]
fn high_page(offset: u8) -> u16 {
    0xFF00 | offset as u16
}
