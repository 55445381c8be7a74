//! Opcode tables.
//!
//! Both tables are built once, on first use, by walking the standard
//! x/y/z bit-field decomposition of the opcode byte (see "Decoding Gameboy
//! Z80 opcodes"). Each slot resolves to an immutable [`Instruction`]
//! descriptor; the eleven opcode holes and the prefix byte stay empty.

use std::fmt;

use lazy_static::lazy_static;

use super::operand::{Args, Operand};
use super::{Bus, Condition, Cpu, Flags, Reg16, Reg8};

/// Prefix byte selecting the secondary table.
pub const PREFIX: u8 = 0xCB;

/// Execution routine shared by every opcode of a family.
pub type ExecFn = fn(&mut Cpu, &mut dyn Bus, &Args);

/// Instruction families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    Ld,
    Ldi,
    Ldd,
    Ldh,
    Ldhl,
    Push,
    Pop,
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
    Inc,
    Dec,
    Daa,
    Cpl,
    Scf,
    Ccf,
    Rlca,
    Rrca,
    Rla,
    Rra,
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
    Bit,
    Res,
    Set,
    Jp,
    Jr,
    Call,
    Ret,
    Reti,
    Rst,
}

impl Mnemonic {
    /// The routine every opcode of this family dispatches to.
    pub(crate) fn routine(self) -> ExecFn {
        match self {
            Mnemonic::Nop => Cpu::exec_nop,
            Mnemonic::Stop => Cpu::exec_stop,
            Mnemonic::Halt => Cpu::exec_halt,
            Mnemonic::Di => Cpu::exec_di,
            Mnemonic::Ei => Cpu::exec_ei,
            Mnemonic::Ld | Mnemonic::Ldh => Cpu::exec_ld,
            Mnemonic::Ldi => Cpu::exec_ldi,
            Mnemonic::Ldd => Cpu::exec_ldd,
            Mnemonic::Ldhl => Cpu::exec_ldhl,
            Mnemonic::Push => Cpu::exec_push,
            Mnemonic::Pop => Cpu::exec_pop,
            Mnemonic::Add => Cpu::exec_add,
            Mnemonic::Adc => Cpu::exec_adc,
            Mnemonic::Sub => Cpu::exec_sub,
            Mnemonic::Sbc => Cpu::exec_sbc,
            Mnemonic::And => Cpu::exec_and,
            Mnemonic::Xor => Cpu::exec_xor,
            Mnemonic::Or => Cpu::exec_or,
            Mnemonic::Cp => Cpu::exec_cp,
            Mnemonic::Inc => Cpu::exec_inc,
            Mnemonic::Dec => Cpu::exec_dec,
            Mnemonic::Daa => Cpu::exec_daa,
            Mnemonic::Cpl => Cpu::exec_cpl,
            Mnemonic::Scf => Cpu::exec_scf,
            Mnemonic::Ccf => Cpu::exec_ccf,
            Mnemonic::Rlca => Cpu::exec_rlca,
            Mnemonic::Rrca => Cpu::exec_rrca,
            Mnemonic::Rla => Cpu::exec_rla,
            Mnemonic::Rra => Cpu::exec_rra,
            Mnemonic::Rlc => Cpu::exec_rlc,
            Mnemonic::Rrc => Cpu::exec_rrc,
            Mnemonic::Rl => Cpu::exec_rl,
            Mnemonic::Rr => Cpu::exec_rr,
            Mnemonic::Sla => Cpu::exec_sla,
            Mnemonic::Sra => Cpu::exec_sra,
            Mnemonic::Swap => Cpu::exec_swap,
            Mnemonic::Srl => Cpu::exec_srl,
            Mnemonic::Bit => Cpu::exec_bit,
            Mnemonic::Res => Cpu::exec_res,
            Mnemonic::Set => Cpu::exec_set,
            Mnemonic::Jp => Cpu::exec_jp,
            Mnemonic::Jr => Cpu::exec_jr,
            Mnemonic::Call => Cpu::exec_call,
            Mnemonic::Ret => Cpu::exec_ret,
            Mnemonic::Reti => Cpu::exec_reti,
            Mnemonic::Rst => Cpu::exec_rst,
        }
    }

    /// Accumulator ALU families whose source-only form (`SUB r`) gets an
    /// explicit leading `A` operand.
    fn implicit_accumulator(self) -> bool {
        matches!(
            self,
            Mnemonic::Sub | Mnemonic::And | Mnemonic::Xor | Mnemonic::Or | Mnemonic::Cp
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mnemonic::Nop => "NOP",
            Mnemonic::Stop => "STOP",
            Mnemonic::Halt => "HALT",
            Mnemonic::Di => "DI",
            Mnemonic::Ei => "EI",
            Mnemonic::Ld => "LD",
            Mnemonic::Ldi => "LDI",
            Mnemonic::Ldd => "LDD",
            Mnemonic::Ldh => "LDH",
            Mnemonic::Ldhl => "LDHL",
            Mnemonic::Push => "PUSH",
            Mnemonic::Pop => "POP",
            Mnemonic::Add => "ADD",
            Mnemonic::Adc => "ADC",
            Mnemonic::Sub => "SUB",
            Mnemonic::Sbc => "SBC",
            Mnemonic::And => "AND",
            Mnemonic::Xor => "XOR",
            Mnemonic::Or => "OR",
            Mnemonic::Cp => "CP",
            Mnemonic::Inc => "INC",
            Mnemonic::Dec => "DEC",
            Mnemonic::Daa => "DAA",
            Mnemonic::Cpl => "CPL",
            Mnemonic::Scf => "SCF",
            Mnemonic::Ccf => "CCF",
            Mnemonic::Rlca => "RLCA",
            Mnemonic::Rrca => "RRCA",
            Mnemonic::Rla => "RLA",
            Mnemonic::Rra => "RRA",
            Mnemonic::Rlc => "RLC",
            Mnemonic::Rrc => "RRC",
            Mnemonic::Rl => "RL",
            Mnemonic::Rr => "RR",
            Mnemonic::Sla => "SLA",
            Mnemonic::Sra => "SRA",
            Mnemonic::Swap => "SWAP",
            Mnemonic::Srl => "SRL",
            Mnemonic::Bit => "BIT",
            Mnemonic::Res => "RES",
            Mnemonic::Set => "SET",
            Mnemonic::Jp => "JP",
            Mnemonic::Jr => "JR",
            Mnemonic::Call => "CALL",
            Mnemonic::Ret => "RET",
            Mnemonic::Reti => "RETI",
            Mnemonic::Rst => "RST",
        };
        f.write_str(name)
    }
}

/// What an instruction does to one flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagEffect {
    Unaffected,
    Reset,
    Set,
    Computed,
}

/// Per-flag effects of one instruction, in Z N H C order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlagPolicy {
    pub z: FlagEffect,
    pub n: FlagEffect,
    pub h: FlagEffect,
    pub c: FlagEffect,
}

impl FlagPolicy {
    /// Parse the four-character notation used by opcode references:
    /// `-` unaffected, `0` reset, `1` set, any letter computed.
    pub const fn from_notation(notation: &[u8; 4]) -> Self {
        const fn effect(c: u8) -> FlagEffect {
            match c {
                b'-' => FlagEffect::Unaffected,
                b'0' => FlagEffect::Reset,
                b'1' => FlagEffect::Set,
                _ => FlagEffect::Computed,
            }
        }

        Self {
            z: effect(notation[0]),
            n: effect(notation[1]),
            h: effect(notation[2]),
            c: effect(notation[3]),
        }
    }

    /// Combine the flags from before and after the routine ran.
    pub fn apply(&self, before: Flags, computed: Flags) -> Flags {
        let mut out = Flags::empty();
        for (flag, effect) in [
            (Flags::Z, self.z),
            (Flags::N, self.n),
            (Flags::H, self.h),
            (Flags::C, self.c),
        ] {
            let value = match effect {
                FlagEffect::Unaffected => before.contains(flag),
                FlagEffect::Reset => false,
                FlagEffect::Set => true,
                FlagEffect::Computed => computed.contains(flag),
            };
            out.set(flag, value);
        }
        out
    }
}

const NONE: FlagPolicy = FlagPolicy::from_notation(b"----");

/// Immutable descriptor for one opcode.
#[derive(Clone)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub opcode: u8,
    pub prefixed: bool,
    pub operands: Vec<Operand>,
    /// Total encoded size, prefix and immediates included.
    pub size: u8,
    pub flags: FlagPolicy,
    pub(crate) exec: ExecFn,
}

impl Instruction {
    fn new(
        mnemonic: Mnemonic,
        opcode: u8,
        prefixed: bool,
        mut operands: Vec<Operand>,
        flags: FlagPolicy,
    ) -> Self {
        if mnemonic.implicit_accumulator() && operands.len() == 1 {
            operands.insert(0, Operand::Reg8(Reg8::A));
        }

        let size = 1
            + prefixed as u8
            + operands.iter().map(|op| op.extra_bytes()).sum::<u8>();

        Self {
            mnemonic,
            opcode,
            prefixed,
            operands,
            size,
            flags,
            exec: mnemonic.routine(),
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("mnemonic", &self.mnemonic)
            .field("opcode", &self.opcode)
            .field("prefixed", &self.prefixed)
            .field("operands", &self.operands)
            .field("size", &self.size)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{operand}")?;
        }
        Ok(())
    }
}

/// A 256-slot opcode table.
pub struct InstructionTable {
    slots: Vec<Option<Instruction>>,
}

impl InstructionTable {
    #[inline]
    pub fn get(&self, opcode: u8) -> Option<&Instruction> {
        self.slots[opcode as usize].as_ref()
    }

    /// All populated slots, in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.slots.iter().flatten()
    }

    fn build(prefixed: bool) -> Self {
        let decode = if prefixed { decode_prefixed } else { decode_primary };
        let slots = (0..=255u8)
            .map(|opcode| {
                decode(opcode).map(|(mnemonic, operands, flags)| {
                    Instruction::new(mnemonic, opcode, prefixed, operands, flags)
                })
            })
            .collect();
        Self { slots }
    }
}

lazy_static! {
    static ref PRIMARY: InstructionTable = InstructionTable::build(false);
    static ref PREFIXED: InstructionTable = InstructionTable::build(true);
}

/// The unprefixed opcode table.
pub fn primary() -> &'static InstructionTable {
    &PRIMARY
}

/// The table reached through the `0xCB` prefix.
pub fn prefixed() -> &'static InstructionTable {
    &PREFIXED
}

type Entry = (Mnemonic, Vec<Operand>, FlagPolicy);

/// Register-or-(HL) operand for the 3-bit register field.
fn r(index: u8) -> Operand {
    match Reg8::from_index(index) {
        Some(reg) => Operand::Reg8(reg),
        None => Operand::Indirect(Reg16::HL),
    }
}

fn rp(p: u8) -> Operand {
    Operand::Reg16([Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP][p as usize & 0x03])
}

fn rp2(p: u8) -> Operand {
    Operand::Reg16([Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF][p as usize & 0x03])
}

fn cc(y: u8) -> Operand {
    Operand::Condition(Condition::from_index(y))
}

/// ALU family and flag policy selected by the y field of 0x80–0xBF and
/// the `op A, n` column.
fn alu(y: u8) -> (Mnemonic, FlagPolicy) {
    match y & 0x07 {
        0 => (Mnemonic::Add, FlagPolicy::from_notation(b"Z0HC")),
        1 => (Mnemonic::Adc, FlagPolicy::from_notation(b"Z0HC")),
        2 => (Mnemonic::Sub, FlagPolicy::from_notation(b"Z1HC")),
        3 => (Mnemonic::Sbc, FlagPolicy::from_notation(b"Z1HC")),
        4 => (Mnemonic::And, FlagPolicy::from_notation(b"Z010")),
        5 => (Mnemonic::Xor, FlagPolicy::from_notation(b"Z000")),
        6 => (Mnemonic::Or, FlagPolicy::from_notation(b"Z000")),
        _ => (Mnemonic::Cp, FlagPolicy::from_notation(b"Z1HC")),
    }
}

/// Pan Docs spells ADD/ADC/SBC with the accumulator and SUB/AND/XOR/OR/CP
/// without it; table construction normalises the latter.
fn alu_operands(mnemonic: Mnemonic, src: Operand) -> Vec<Operand> {
    match mnemonic {
        Mnemonic::Add | Mnemonic::Adc | Mnemonic::Sbc => vec![Operand::Reg8(Reg8::A), src],
        _ => vec![src],
    }
}

fn decode_primary(opcode: u8) -> Option<Entry> {
    use Mnemonic::*;
    use Operand::{HighC, HighImm8, Imm16, Imm8, Indirect, IndirectImm16};

    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    const A: Operand = Operand::Reg8(Reg8::A);
    const HL: Operand = Operand::Reg16(Reg16::HL);
    const SP: Operand = Operand::Reg16(Reg16::SP);

    let entry = match (x, z) {
        (0, 0) => match y {
            0 => (Nop, vec![], NONE),
            1 => (Ld, vec![IndirectImm16, SP], NONE),
            2 => (Stop, vec![Imm8], NONE),
            3 => (Jr, vec![Imm8], NONE),
            _ => (Jr, vec![cc(y - 4), Imm8], NONE),
        },
        (0, 1) if q == 0 => (Ld, vec![rp(p), Imm16], NONE),
        (0, 1) => (Add, vec![HL, rp(p)], FlagPolicy::from_notation(b"-0HC")),
        (0, 2) => {
            let (mnemonic, mem) = match p {
                0 => (Ld, Indirect(Reg16::BC)),
                1 => (Ld, Indirect(Reg16::DE)),
                2 => (Ldi, Indirect(Reg16::HL)),
                _ => (Ldd, Indirect(Reg16::HL)),
            };
            if q == 0 {
                (mnemonic, vec![mem, A], NONE)
            } else {
                (mnemonic, vec![A, mem], NONE)
            }
        }
        (0, 3) if q == 0 => (Inc, vec![rp(p)], NONE),
        (0, 3) => (Dec, vec![rp(p)], NONE),
        (0, 4) => (Inc, vec![r(y)], FlagPolicy::from_notation(b"Z0H-")),
        (0, 5) => (Dec, vec![r(y)], FlagPolicy::from_notation(b"Z1H-")),
        (0, 6) => (Ld, vec![r(y), Imm8], NONE),
        (0, 7) => match y {
            0 => (Rlca, vec![], FlagPolicy::from_notation(b"000C")),
            1 => (Rrca, vec![], FlagPolicy::from_notation(b"000C")),
            2 => (Rla, vec![], FlagPolicy::from_notation(b"000C")),
            3 => (Rra, vec![], FlagPolicy::from_notation(b"000C")),
            4 => (Daa, vec![], FlagPolicy::from_notation(b"Z-0C")),
            5 => (Cpl, vec![], FlagPolicy::from_notation(b"-11-")),
            6 => (Scf, vec![], FlagPolicy::from_notation(b"-001")),
            _ => (Ccf, vec![], FlagPolicy::from_notation(b"-00C")),
        },
        (1, _) if y == 6 && z == 6 => (Halt, vec![], NONE),
        (1, _) => (Ld, vec![r(y), r(z)], NONE),
        (2, _) => {
            let (mnemonic, flags) = alu(y);
            (mnemonic, alu_operands(mnemonic, r(z)), flags)
        }
        (3, 0) => match y {
            0..=3 => (Ret, vec![cc(y)], NONE),
            4 => (Ldh, vec![HighImm8, A], NONE),
            5 => (Add, vec![SP, Imm8], FlagPolicy::from_notation(b"00HC")),
            6 => (Ldh, vec![A, HighImm8], NONE),
            _ => (Ldhl, vec![SP, Imm8], FlagPolicy::from_notation(b"00HC")),
        },
        (3, 1) if q == 0 => {
            let flags = if p == 3 {
                FlagPolicy::from_notation(b"ZNHC")
            } else {
                NONE
            };
            (Pop, vec![rp2(p)], flags)
        }
        (3, 1) => match p {
            0 => (Ret, vec![], NONE),
            1 => (Reti, vec![], NONE),
            2 => (Jp, vec![HL], NONE),
            _ => (Ld, vec![SP, HL], NONE),
        },
        (3, 2) => match y {
            0..=3 => (Jp, vec![cc(y), Imm16], NONE),
            4 => (Ld, vec![HighC, A], NONE),
            5 => (Ld, vec![IndirectImm16, A], NONE),
            6 => (Ld, vec![A, HighC], NONE),
            _ => (Ld, vec![A, IndirectImm16], NONE),
        },
        (3, 3) => match y {
            0 => (Jp, vec![Imm16], NONE),
            6 => (Di, vec![], NONE),
            7 => (Ei, vec![], NONE),
            // 1 is the CB prefix; the rest are opcode holes.
            _ => return None,
        },
        (3, 4) if y <= 3 => (Call, vec![cc(y), Imm16], NONE),
        (3, 5) if q == 0 => (Push, vec![rp2(p)], NONE),
        (3, 5) if p == 0 => (Call, vec![Imm16], NONE),
        (3, 6) => {
            let (mnemonic, flags) = alu(y);
            (mnemonic, alu_operands(mnemonic, Imm8), flags)
        }
        (3, 7) => (Rst, vec![Operand::Vector(y * 8)], NONE),
        _ => return None,
    };

    Some(entry)
}

fn decode_prefixed(opcode: u8) -> Option<Entry> {
    use Mnemonic::*;

    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let target = r(opcode & 0x07);

    let entry = match x {
        0 => {
            let mnemonic = [Rlc, Rrc, Rl, Rr, Sla, Sra, Swap, Srl][y as usize];
            let flags = if mnemonic == Swap {
                FlagPolicy::from_notation(b"Z000")
            } else {
                FlagPolicy::from_notation(b"Z00C")
            };
            (mnemonic, vec![target], flags)
        }
        1 => (
            Bit,
            vec![Operand::Bit(y), target],
            FlagPolicy::from_notation(b"Z01-"),
        ),
        2 => (Res, vec![Operand::Bit(y), target], NONE),
        _ => (Set, vec![Operand::Bit(y), target], NONE),
    };

    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLES: [u8; 11] = [
        0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
    ];

    #[test]
    fn primary_table_covers_everything_but_holes_and_prefix() {
        for opcode in 0..=255u8 {
            let expected = !(HOLES.contains(&opcode) || opcode == PREFIX);
            assert_eq!(
                primary().get(opcode).is_some(),
                expected,
                "opcode {opcode:#04x}"
            );
        }
        assert_eq!(primary().iter().count(), 244);
        assert_eq!(prefixed().iter().count(), 256);
    }

    #[test]
    fn sizes_follow_operands() {
        let size = |op: u8| primary().get(op).map(|i| i.size);
        assert_eq!(size(0x00), Some(1));
        assert_eq!(size(0x01), Some(3));
        assert_eq!(size(0x08), Some(3));
        assert_eq!(size(0x10), Some(2));
        assert_eq!(size(0x18), Some(2));
        assert_eq!(size(0x36), Some(2));
        assert_eq!(size(0xE0), Some(2));
        assert_eq!(size(0xE2), Some(1));
        assert_eq!(size(0xEA), Some(3));
        assert_eq!(size(0xF8), Some(2));
        assert!(prefixed().iter().all(|i| i.size == 2));
    }

    #[test]
    fn accumulator_operand_is_normalised_at_construction() {
        let sub = primary().get(0x90).map(|i| i.operands.clone());
        assert_eq!(
            sub,
            Some(vec![Operand::Reg8(Reg8::A), Operand::Reg8(Reg8::B)])
        );
        let cp = primary().get(0xFE).map(|i| i.operands.clone());
        assert_eq!(cp, Some(vec![Operand::Reg8(Reg8::A), Operand::Imm8]));
        let add = primary().get(0x87).map(|i| i.operands.clone());
        assert_eq!(
            add,
            Some(vec![Operand::Reg8(Reg8::A), Operand::Reg8(Reg8::A)])
        );
    }

    #[test]
    fn disassembly_uses_pan_docs_syntax() {
        let text = |table: &InstructionTable, op: u8| table.get(op).map(|i| i.to_string());
        assert_eq!(text(primary(), 0x2A).as_deref(), Some("LDI A, (HL)"));
        assert_eq!(text(primary(), 0x20).as_deref(), Some("JR NZ, n"));
        assert_eq!(text(primary(), 0xAF).as_deref(), Some("XOR A, A"));
        assert_eq!(text(primary(), 0xF8).as_deref(), Some("LDHL SP, n"));
        assert_eq!(text(primary(), 0xEF).as_deref(), Some("RST 28H"));
        assert_eq!(text(prefixed(), 0x7E).as_deref(), Some("BIT 7, (HL)"));
    }

    #[test]
    fn every_mnemonic_prints_its_upper_case_name() {
        for instruction in primary().iter().chain(prefixed().iter()) {
            let name = instruction.mnemonic.to_string();
            assert_eq!(name, format!("{:?}", instruction.mnemonic).to_uppercase());
            assert!(instruction.to_string().starts_with(&name));
        }
    }

    #[test]
    fn flag_policy_keeps_unaffected_and_forces_fixed_bits() {
        let policy = FlagPolicy::from_notation(b"Z1H-");
        let before = Flags::C;
        let computed = Flags::Z | Flags::H;
        assert_eq!(
            policy.apply(before, computed),
            Flags::Z | Flags::N | Flags::H | Flags::C
        );

        let policy = FlagPolicy::from_notation(b"-001");
        assert_eq!(policy.apply(Flags::Z | Flags::N, Flags::empty()), Flags::Z | Flags::C);
    }
}
