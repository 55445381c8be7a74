use crate::cpu::alu;
use crate::cpu::{Arg, Args, Bus, Cpu};

impl Cpu {
    /// INC r, INC (HL) and INC rr. The 16-bit form touches no flags.
    pub(in crate::cpu) fn exec_inc(&mut self, bus: &mut dyn Bus, args: &Args) {
        match args[0] {
            Arg::Reg16(reg) => {
                let value = self.regs.get16(reg).wrapping_add(1);
                self.regs.set16(reg, value);
            }
            target => {
                let value = self.read_arg8(bus, target);
                let (result, flags) = alu::inc8(value);
                self.write_arg8(bus, target, result);
                self.regs.f = flags;
            }
        }
    }

    /// DEC r, DEC (HL) and DEC rr. The 16-bit form touches no flags.
    pub(in crate::cpu) fn exec_dec(&mut self, bus: &mut dyn Bus, args: &Args) {
        match args[0] {
            Arg::Reg16(reg) => {
                let value = self.regs.get16(reg).wrapping_sub(1);
                self.regs.set16(reg, value);
            }
            target => {
                let value = self.read_arg8(bus, target);
                let (result, flags) = alu::dec8(value);
                self.write_arg8(bus, target, result);
                self.regs.f = flags;
            }
        }
    }
}
