use std::fmt;

use anyhow::{bail, Context, Result};
use lr35902::{Bus, Cpu, Flags, Memory, Reg16, Reg8, Step};
use typed_builder::TypedBuilder;

/// Where case programs are loaded. Kept clear of the low addresses the
/// fixtures use as data.
pub const DEFAULT_ORIGIN: u16 = 0x0100;

/// One piece of machine state, used both as a preset and as an expectation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Reg8(Reg8, u8),
    Reg16(Reg16, u16),
    Flag(Flags, bool),
    /// Consecutive bytes starting at an address.
    Mem(u16, Vec<u8>),
}

impl Field {
    fn apply(&self, cpu: &mut Cpu, memory: &mut Memory) {
        match self {
            Field::Reg8(reg, value) => cpu.regs.set8(*reg, *value),
            Field::Reg16(reg, value) => cpu.regs.set16(*reg, *value),
            Field::Flag(flag, value) => cpu.set_flag(*flag, *value),
            Field::Mem(addr, bytes) => memory.load(*addr, bytes),
        }
    }

    /// Describe the mismatch, if any.
    fn check(&self, cpu: &Cpu, memory: &mut Memory) -> Option<String> {
        match self {
            Field::Reg8(reg, expected) => {
                let actual = cpu.regs.get8(*reg);
                (actual != *expected)
                    .then(|| format!("{reg}: expected 0x{expected:02X}, got 0x{actual:02X}"))
            }
            Field::Reg16(reg, expected) => {
                let actual = cpu.regs.get16(*reg);
                (actual != *expected)
                    .then(|| format!("{reg}: expected 0x{expected:04X}, got 0x{actual:04X}"))
            }
            Field::Flag(flag, expected) => {
                let actual = cpu.get_flag(*flag);
                (actual != *expected)
                    .then(|| format!("{flag:?}: expected {expected}, got {actual}"))
            }
            Field::Mem(addr, expected) => {
                let actual: Vec<u8> = (0..expected.len())
                    .map(|offset| memory.read8(addr.wrapping_add(offset as u16)))
                    .collect();
                (actual != *expected).then(|| {
                    format!("mem[0x{addr:04X}]: expected {expected:02X?}, got {actual:02X?}")
                })
            }
        }
    }

    /// Expect exactly the flags in `set`, and every other flag clear.
    pub fn flags(set: Flags) -> Vec<Field> {
        [Flags::Z, Flags::N, Flags::H, Flags::C]
            .into_iter()
            .map(|flag| Field::Flag(flag, set.contains(flag)))
            .collect()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Reg8(reg, value) => write!(f, "{reg} = 0x{value:02X}"),
            Field::Reg16(reg, value) => write!(f, "{reg} = 0x{value:04X}"),
            Field::Flag(flag, value) => write!(f, "{flag:?} = {value}"),
            Field::Mem(addr, bytes) => write!(f, "mem[0x{addr:04X}] = {bytes:02X?}"),
        }
    }
}

/// A single-instruction conformance case.
///
/// Presets are applied in order, so a later preset wins where two of them
/// touch the same register. Unless an expectation names PC, PC must end up
/// just past the instruction.
#[derive(Clone, Debug, TypedBuilder)]
pub struct Case {
    #[builder(setter(into))]
    pub name: String,
    /// Opcode bytes, including the `0xCB` prefix where there is one.
    #[builder(setter(into))]
    pub opcode: Vec<u8>,
    /// Immediate operand bytes following the opcode.
    #[builder(default, setter(into))]
    pub extra_instruction_bytes: Vec<u8>,
    #[builder(default)]
    pub presets: Vec<Field>,
    #[builder(default)]
    pub expectations: Vec<Field>,
    #[builder(default = DEFAULT_ORIGIN)]
    pub origin: u16,
}

impl Case {
    pub fn run(&self) -> Result<()> {
        let mut cpu = Cpu::new();
        let mut memory = Memory::new();

        let program: Vec<u8> = self
            .opcode
            .iter()
            .chain(&self.extra_instruction_bytes)
            .copied()
            .collect();
        memory.load(self.origin, &program);
        cpu.regs.pc = self.origin;

        for preset in &self.presets {
            preset.apply(&mut cpu, &mut memory);
        }

        log::debug!(
            "{}: {:02X?} at 0x{:04X}",
            self.name,
            program,
            self.origin
        );

        let step = cpu
            .step(&mut memory)
            .with_context(|| format!("case `{}`", self.name))?;
        let Step::Executed(instruction) = step else {
            bail!("case `{}`: nothing executed ({step:?})", self.name);
        };

        let mut mismatches: Vec<String> = self
            .expectations
            .iter()
            .filter_map(|expectation| expectation.check(&cpu, &mut memory))
            .collect();

        let names_pc = self
            .expectations
            .iter()
            .any(|field| matches!(field, Field::Reg16(Reg16::PC, _)));
        if !names_pc {
            let expected = self.origin.wrapping_add(instruction.size as u16);
            if cpu.regs.pc != expected {
                mismatches.push(format!(
                    "PC: expected 0x{expected:04X}, got 0x{:04X}",
                    cpu.regs.pc
                ));
            }
        }

        if !mismatches.is_empty() {
            log::error!("{} ({instruction}): {}", self.name, mismatches.join("; "));
            bail!(
                "case `{}` ({instruction}): {}",
                self.name,
                mismatches.join("; ")
            );
        }

        log::trace!("{} ({instruction}) ok", self.name);
        Ok(())
    }
}
