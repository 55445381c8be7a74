use crate::cpu::{Args, Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn exec_nop(&mut self, _bus: &mut dyn Bus, _args: &Args) {}

    /// STOP swallows its padding byte and parks the CPU until
    /// [`Cpu::wake`].
    pub(in crate::cpu) fn exec_stop(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.stopped = true;
        log::debug!("STOP at PC=0x{:04X}", self.regs.pc.wrapping_sub(2));
    }

    pub(in crate::cpu) fn exec_halt(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.halted = true;
        log::debug!("HALT at PC=0x{:04X}", self.regs.pc.wrapping_sub(1));
    }

    pub(in crate::cpu) fn exec_di(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.disable_ime();
        log::debug!("DI");
    }

    /// IME goes up after the instruction following EI has run.
    pub(in crate::cpu) fn exec_ei(&mut self, _bus: &mut dyn Bus, _args: &Args) {
        self.schedule_ime_enable();
        log::debug!("EI, IME pending");
    }
}
