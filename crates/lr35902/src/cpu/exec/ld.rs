use crate::cpu::alu;
use crate::cpu::{Arg, Args, Bus, Cpu};

impl Cpu {
    /// LD and LDH in all their forms.
    ///
    /// The transfer is 16-bit when either side is a register pair or a
    /// 16-bit immediate (`LD rr,nn`, `LD SP,HL`, `LD (nn),SP`), 8-bit
    /// otherwise.
    pub(in crate::cpu) fn exec_ld(&mut self, bus: &mut dyn Bus, args: &Args) {
        let (dst, src) = (args[0], args[1]);

        let wide = matches!(dst, Arg::Reg16(_)) || matches!(src, Arg::Reg16(_) | Arg::Imm16(_));
        if wide {
            let value = self.read_arg16(bus, src);
            self.write_arg16(bus, dst, value);
        } else {
            let value = self.read_arg8(bus, src);
            self.write_arg8(bus, dst, value);
        }
    }

    /// LDI: 8-bit transfer through (HL), then HL += 1.
    pub(in crate::cpu) fn exec_ldi(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.exec_ld(bus, args);
        let hl = self.regs.hl().wrapping_add(1);
        self.regs.set_hl(hl);
    }

    /// LDD: 8-bit transfer through (HL), then HL -= 1.
    pub(in crate::cpu) fn exec_ldd(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.exec_ld(bus, args);
        let hl = self.regs.hl().wrapping_sub(1);
        self.regs.set_hl(hl);
    }

    /// LDHL SP,n: HL = SP + signed n.
    pub(in crate::cpu) fn exec_ldhl(&mut self, bus: &mut dyn Bus, args: &Args) {
        let sp = self.read_arg16(bus, args[0]);
        let Arg::Imm8(offset) = args[1] else {
            unreachable!("LDHL without an immediate: {args:?}");
        };
        let (hl, flags) = alu::add16_signed(sp, offset);
        self.regs.set_hl(hl);
        self.regs.f = flags;
    }
}
