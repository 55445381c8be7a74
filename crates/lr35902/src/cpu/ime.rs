use super::Cpu;

impl Cpu {
    /// Request IME to be set once the instruction after EI has completed.
    #[inline]
    pub(super) fn schedule_ime_enable(&mut self) {
        self.ime_enable_pending = true;
    }

    /// Clear IME along with any enable still in flight from EI.
    #[inline]
    pub(super) fn disable_ime(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    /// Apply delayed IME change requested by EI.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second step after EI: actually enable IME.
            self.ime = true;
            self.ime_enable_delay = false;
            log::debug!("IME enabled");
        } else if self.ime_enable_pending {
            // First step after EI: arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
