/// Abstraction over the byte-addressable space the CPU executes against.
///
/// The engine only ever needs plain reads and writes; banking, IO
/// registers and anything else mapped into the 16-bit space belong to the
/// implementor. Addresses are `u16`, so every computed address is already
/// wrapped into the valid range before it reaches the bus.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read. The high byte comes from `addr + 1`,
    /// wrapping at the top of the address space.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write; mirror of [`Bus::read16`].
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }
}
