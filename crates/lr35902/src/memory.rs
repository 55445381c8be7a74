use rand::RngCore;

use crate::cpu::Bus;

/// Size of the flat LR35902 address space.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Flat 64 KiB memory with no banking or IO side effects.
///
/// This is the bus the engine is tested against; a full machine would put
/// cartridge mapping and IO registers behind its own [`Bus`] instead.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; ADDRESS_SPACE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl Memory {
    /// Zero-filled memory.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Memory filled with random bytes, like RAM at power-on.
    pub fn randomized() -> Self {
        let mut memory = Self::new();
        rand::thread_rng().fill_bytes(memory.bytes.as_mut_slice());
        memory
    }

    /// Copy `data` into memory starting at `addr`, wrapping past 0xFFFF.
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        for (offset, &byte) in data.iter().enumerate() {
            let target = addr.wrapping_add(offset as u16);
            self.bytes[target as usize] = byte;
        }
    }

    /// Borrow the whole address space.
    pub fn as_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl Bus for Memory {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}
