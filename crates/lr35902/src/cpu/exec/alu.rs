use crate::cpu::alu;
use crate::cpu::cb::{self, ShiftOp};
use crate::cpu::{Arg, Args, Bus, Cpu, Flags, Reg16};

impl Cpu {
    /// ADD A,r / ADD A,n, ADD HL,rr and ADD SP,n.
    pub(in crate::cpu) fn exec_add(&mut self, bus: &mut dyn Bus, args: &Args) {
        match (args[0], args[1]) {
            (Arg::Reg16(Reg16::HL), src) => {
                let value = self.read_arg16(bus, src);
                let (hl, flags) = alu::add16(self.regs.hl(), value);
                self.regs.set_hl(hl);
                self.regs.f = flags;
            }
            (Arg::Reg16(Reg16::SP), Arg::Imm8(offset)) => {
                let (sp, flags) = alu::add16_signed(self.regs.sp, offset);
                self.regs.sp = sp;
                self.regs.f = flags;
            }
            (_, src) => {
                let value = self.read_arg8(bus, src);
                self.accumulate(alu::add8(self.regs.a, value, false));
            }
        }
    }

    pub(in crate::cpu) fn exec_adc(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg8(bus, args[1]);
        let carry = self.get_flag(Flags::C);
        self.accumulate(alu::add8(self.regs.a, value, carry));
    }

    pub(in crate::cpu) fn exec_sub(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg8(bus, args[1]);
        self.accumulate(alu::sub8(self.regs.a, value, false));
    }

    pub(in crate::cpu) fn exec_sbc(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg8(bus, args[1]);
        let carry = self.get_flag(Flags::C);
        self.accumulate(alu::sub8(self.regs.a, value, carry));
    }

    pub(in crate::cpu) fn exec_and(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg8(bus, args[1]);
        self.accumulate(alu::logic(self.regs.a & value));
    }

    pub(in crate::cpu) fn exec_xor(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg8(bus, args[1]);
        self.accumulate(alu::logic(self.regs.a ^ value));
    }

    pub(in crate::cpu) fn exec_or(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg8(bus, args[1]);
        self.accumulate(alu::logic(self.regs.a | value));
    }

    /// CP keeps A and only reports the flags of `A - value`.
    pub(in crate::cpu) fn exec_cp(&mut self, bus: &mut dyn Bus, args: &Args) {
        let value = self.read_arg8(bus, args[1]);
        let (_, flags) = alu::sub8(self.regs.a, value, false);
        self.regs.f = flags;
    }

    pub(in crate::cpu) fn exec_daa(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.accumulate(alu::daa(self.regs.a, self.regs.f));
    }

    /// N and H are forced by the flag policy.
    pub(in crate::cpu) fn exec_cpl(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.regs.a = !self.regs.a;
    }

    /// Every flag SCF touches is forced by its policy.
    pub(in crate::cpu) fn exec_scf(&mut self, _bus: &mut dyn Bus, _args: &Args) {}

    pub(in crate::cpu) fn exec_ccf(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        let carry = self.get_flag(Flags::C);
        self.set_flag(Flags::C, !carry);
    }

    pub(in crate::cpu) fn exec_rlca(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.rotate_a(cb::rlc);
    }

    pub(in crate::cpu) fn exec_rrca(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.rotate_a(cb::rrc);
    }

    pub(in crate::cpu) fn exec_rla(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.rotate_a(cb::rl);
    }

    pub(in crate::cpu) fn exec_rra(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.rotate_a(cb::rr);
    }

    /// Unprefixed accumulator rotates. Unlike their CB forms Z is always
    /// cleared (policy `000C`).
    fn rotate_a(&mut self, op: ShiftOp) {
        let (result, carry) = op(self.regs.a, self.get_flag(Flags::C));
        self.regs.a = result;
        self.set_flag(Flags::C, carry);
    }

    /// Store an accumulator result and its computed flags.
    fn accumulate(&mut self, (result, flags): (u8, Flags)) {
        self.regs.a = result;
        self.regs.f = flags;
    }
}
