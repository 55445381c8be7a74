use crate::cpu::{Arg, Args, Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_push(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg16(bus, args[0]);
        self.push_u16(bus, value);
    }

    /// POP rr. For AF the low nibble of F is dropped on the way in.
    pub(in crate::cpu) fn exec_pop(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.pop_u16(bus);
        self.write_arg16(bus, args[0], value);
    }

    pub(in crate::cpu) fn exec_rst(&mut self, bus: &mut dyn Bus, args: &Args) {
        let Arg::Vector(vector) = args[0] else {
            unreachable!("RST without a vector: {args:?}");
        };
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = vector as u16;
    }

    /// CALL nn and CALL cc,nn. The return address is the byte after the
    /// instruction.
    pub(in crate::cpu) fn exec_call(&mut self, bus: &mut dyn Bus, args: &Args) {
        let (taken, rest) = self.split_condition(args);
        if !taken {
            return;
        }
        let addr = self.read_arg16(bus, rest[0]);
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = addr;
    }

    pub(in crate::cpu) fn exec_ret(&mut self, bus: &mut dyn Bus, args: &Args) {
        let (taken, _) = self.split_condition(args);
        if taken {
            self.regs.pc = self.pop_u16(bus);
        }
    }

    /// RETI enables interrupts immediately, without EI's delay.
    pub(in crate::cpu) fn exec_reti(&mut self, bus: &mut dyn Bus, _args: &Args) {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
    }
}
