use super::{Arg, Bus, Cpu};

impl Cpu {
    #[inline]
    pub(super) fn fetch8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn push_u16(&mut self, bus: &mut dyn Bus, value: u16) {
        // Stack grows downward: memory[SP] = low, memory[SP+1] = high.
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write16(self.regs.sp, value);
    }

    #[inline]
    pub(super) fn pop_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// Read an 8-bit source: register, immediate or memory byte.
    #[inline]
    pub(super) fn read_arg8(&self, bus: &mut dyn Bus, arg: Arg) -> u8 {
        match arg {
            Arg::Reg8(reg) => self.regs.get8(reg),
            Arg::Imm8(value) => value,
            Arg::Mem(addr) => bus.read8(addr),
            other => unreachable!("not an 8-bit source: {other:?}"),
        }
    }

    /// Write an 8-bit destination: register or memory byte.
    #[inline]
    pub(super) fn write_arg8(&mut self, bus: &mut dyn Bus, arg: Arg, value: u8) {
        match arg {
            Arg::Reg8(reg) => self.regs.set8(reg, value),
            Arg::Mem(addr) => bus.write8(addr, value),
            other => unreachable!("not an 8-bit destination: {other:?}"),
        }
    }

    #[inline]
    pub(super) fn read_arg16(&self, bus: &mut dyn Bus, arg: Arg) -> u16 {
        match arg {
            Arg::Reg16(reg) => self.regs.get16(reg),
            Arg::Imm16(value) => value,
            Arg::Mem(addr) => bus.read16(addr),
            other => unreachable!("not a 16-bit source: {other:?}"),
        }
    }

    #[inline]
    pub(super) fn write_arg16(&mut self, bus: &mut dyn Bus, arg: Arg, value: u16) {
        match arg {
            Arg::Reg16(reg) => self.regs.set16(reg, value),
            Arg::Mem(addr) => bus.write16(addr, value),
            other => unreachable!("not a 16-bit destination: {other:?}"),
        }
    }

    /// Evaluate an optional leading condition operand.
    ///
    /// Returns whether the branch is taken and the remaining arguments.
    #[inline]
    pub(super) fn split_condition<'a>(&self, args: &'a [Arg]) -> (bool, &'a [Arg]) {
        match args.split_first() {
            Some((Arg::Condition(cc), rest)) => (cc.holds(self.regs.f), rest),
            _ => (true, args),
        }
    }
}
