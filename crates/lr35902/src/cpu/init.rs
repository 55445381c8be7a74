use super::{Cpu, Flags, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU with every register and flag cleared.
    ///
    /// This is the baseline conformance presets are applied on top of.
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
        }
    }

    /// A CPU in the state the DMG boot ROM leaves behind.
    pub fn dmg() -> Self {
        let mut cpu = Self::new();
        cpu.reset_to_boot_state();
        cpu
    }

    /// Clear all registers and control state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Initialize registers to match the DMG boot ROM's state after it
    /// hands control to cartridge code.
    ///
    /// These values follow common emulator conventions and are based on
    /// hardware tests (e.g. as used by the `rboy` project and documented
    /// in Pan Docs).
    pub fn reset_to_boot_state(&mut self) {
        self.reset();

        self.regs.a = 0x01;
        // Z, N, H, C = 1,0,1,1
        self.regs.f = Flags::Z | Flags::H | Flags::C;
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;

        // Per Pan Docs, IME is clear when control is handed to the cartridge
        // at 0x0100.
        self.ime = false;
    }

    /// Leave HALT or STOP.
    ///
    /// Interrupt delivery lives outside this core, so the host decides when
    /// a halted or stopped CPU resumes.
    pub fn wake(&mut self) {
        if self.halted || self.stopped {
            log::debug!("CPU wake at PC=0x{:04X}", self.regs.pc);
        }
        self.halted = false;
        self.stopped = false;
    }
}
