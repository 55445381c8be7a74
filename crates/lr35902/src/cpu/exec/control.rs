use crate::cpu::{Arg, Args, Bus, Cpu};

impl Cpu {
    /// JP nn, JP cc,nn and JP (HL).
    pub(in crate::cpu) fn exec_jp(&mut self, bus: &mut dyn Bus, args: &Args) {
        let (taken, rest) = self.split_condition(args);
        if taken {
            self.regs.pc = self.read_arg16(bus, rest[0]);
        }
    }

    /// JR n and JR cc,n. The offset is signed and relative to the address
    /// of the next instruction.
    pub(in crate::cpu) fn exec_jr(&mut self, _bus: &mut dyn Bus, args: &Args) {
        let (taken, rest) = self.split_condition(args);
        let Arg::Imm8(offset) = rest[0] else {
            unreachable!("JR without an offset: {args:?}");
        };
        if taken {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i8 as u16);
        }
    }
}
