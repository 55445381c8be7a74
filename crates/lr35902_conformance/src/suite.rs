//! Built-in fixtures, grouped by instruction family.
//!
//! Every case starts from an all-zero CPU and zeroed memory.

use lr35902::{Flags, Reg16, Reg8, Registers};

use crate::{Case, Field};

const REG8: [Reg8; 7] = [Reg8::A, Reg8::B, Reg8::C, Reg8::D, Reg8::E, Reg8::H, Reg8::L];

/// The 3-bit register field encoding.
fn index(reg: Reg8) -> u8 {
    match reg {
        Reg8::B => 0,
        Reg8::C => 1,
        Reg8::D => 2,
        Reg8::E => 3,
        Reg8::H => 4,
        Reg8::L => 5,
        Reg8::A => 7,
    }
}

const HL_INDEX: u8 = 6;

/// Expectations with exact flags appended.
fn with_flags(mut fields: Vec<Field>, flags: Flags) -> Vec<Field> {
    fields.extend(Field::flags(flags));
    fields
}

pub fn all() -> Vec<Case> {
    let mut cases = loads();
    cases.extend(stack());
    cases.extend(add());
    cases.extend(adc());
    cases.extend(sub());
    cases.extend(inc());
    cases.extend(misc());
    cases
}

pub fn loads() -> Vec<Case> {
    let mut cases = Vec::new();

    for dst in REG8 {
        cases.push(
            Case::builder()
                .name(format!("LD {dst}, n"))
                .opcode([0x06 | index(dst) << 3])
                .extra_instruction_bytes([0x21])
                .expectations(vec![Field::Reg8(dst, 0x21)])
                .build(),
        );

        for src in REG8 {
            cases.push(
                Case::builder()
                    .name(format!("LD {dst}, {src}"))
                    .opcode([0x40 | index(dst) << 3 | index(src)])
                    .presets(vec![Field::Reg8(src, 0x21)])
                    .expectations(vec![Field::Reg8(dst, 0x21)])
                    .build(),
            );
        }
    }

    let indirect_loads = REG8
        .into_iter()
        .map(|reg| (0x40 | index(reg) << 3 | HL_INDEX, reg, Reg16::HL))
        .chain([(0x0A, Reg8::A, Reg16::BC), (0x1A, Reg8::A, Reg16::DE)]);
    for (opcode, dst, pair) in indirect_loads {
        cases.push(
            Case::builder()
                .name(format!("LD {dst}, ({pair})"))
                .opcode([opcode])
                .presets(vec![
                    Field::Mem(0x0CAF, vec![0x21]),
                    Field::Reg16(pair, 0x0CAF),
                ])
                .expectations(vec![Field::Reg8(dst, 0x21)])
                .build(),
        );
    }

    let indirect_stores = REG8
        .into_iter()
        .map(|reg| (0x70 | index(reg), Reg16::HL, reg))
        .chain([(0x02, Reg16::BC, Reg8::A), (0x12, Reg16::DE, Reg8::A)]);
    for (opcode, pair, src) in indirect_stores {
        // Where src is half of the pair, setting the pair overwrites it.
        let mut regs = Registers::default();
        regs.set8(src, 0x21);
        regs.set16(pair, 0x0CAF);
        let expected = regs.get8(src);

        cases.push(
            Case::builder()
                .name(format!("LD ({pair}), {src}"))
                .opcode([opcode])
                .presets(vec![Field::Reg8(src, 0x21), Field::Reg16(pair, 0x0CAF)])
                .expectations(vec![Field::Mem(0x0CAF, vec![expected])])
                .build(),
        );
    }

    cases.extend([
        Case::builder()
            .name("LD (HL), n")
            .opcode([0x36])
            .extra_instruction_bytes([0x21])
            .presets(vec![Field::Reg16(Reg16::HL, 0x0CAF)])
            .expectations(vec![Field::Mem(0x0CAF, vec![0x21])])
            .build(),
        Case::builder()
            .name("LD A, (nn)")
            .opcode([0xFA])
            .extra_instruction_bytes([0xAF, 0x0C])
            .presets(vec![Field::Mem(0x0CAF, vec![0x21])])
            .expectations(vec![Field::Reg8(Reg8::A, 0x21)])
            .build(),
        Case::builder()
            .name("LD (nn), A")
            .opcode([0xEA])
            .extra_instruction_bytes([0xAF, 0x0C])
            .presets(vec![Field::Reg8(Reg8::A, 0x21)])
            .expectations(vec![Field::Mem(0x0CAF, vec![0x21])])
            .build(),
        Case::builder()
            .name("LD A, (C)")
            .opcode([0xF2])
            .presets(vec![
                Field::Reg8(Reg8::C, 0x13),
                Field::Mem(0xFF13, vec![0x21]),
            ])
            .expectations(vec![Field::Reg8(Reg8::A, 0x21)])
            .build(),
        Case::builder()
            .name("LD (C), A")
            .opcode([0xE2])
            .presets(vec![Field::Reg8(Reg8::A, 0x21), Field::Reg8(Reg8::C, 0x13)])
            .expectations(vec![Field::Mem(0xFF13, vec![0x21])])
            .build(),
        Case::builder()
            .name("LDD A, (HL)")
            .opcode([0x3A])
            .presets(vec![
                Field::Reg16(Reg16::HL, 0x0000),
                Field::Mem(0x0000, vec![0x21]),
            ])
            .expectations(vec![
                Field::Reg8(Reg8::A, 0x21),
                Field::Reg16(Reg16::HL, 0xFFFF),
            ])
            .build(),
        Case::builder()
            .name("LDD (HL), A")
            .opcode([0x32])
            .presets(vec![Field::Reg8(Reg8::A, 0x21), Field::Reg16(Reg16::HL, 0x0000)])
            .expectations(vec![
                Field::Reg16(Reg16::HL, 0xFFFF),
                Field::Mem(0x0000, vec![0x21]),
            ])
            .build(),
        Case::builder()
            .name("LDI A, (HL)")
            .opcode([0x2A])
            .presets(vec![
                Field::Reg16(Reg16::HL, 0xFFFF),
                Field::Mem(0xFFFF, vec![0x21]),
            ])
            .expectations(vec![
                Field::Reg8(Reg8::A, 0x21),
                Field::Reg16(Reg16::HL, 0x0000),
            ])
            .build(),
        Case::builder()
            .name("LDI (HL), A")
            .opcode([0x22])
            .presets(vec![Field::Reg8(Reg8::A, 0x21), Field::Reg16(Reg16::HL, 0xFFFF)])
            .expectations(vec![
                Field::Reg16(Reg16::HL, 0x0000),
                Field::Mem(0xFFFF, vec![0x21]),
            ])
            .build(),
        Case::builder()
            .name("LDH (n), A")
            .opcode([0xE0])
            .extra_instruction_bytes([0x13])
            .presets(vec![Field::Reg8(Reg8::A, 0x21)])
            .expectations(vec![Field::Mem(0xFF13, vec![0x21])])
            .build(),
        Case::builder()
            .name("LDH A, (n)")
            .opcode([0xF0])
            .extra_instruction_bytes([0x13])
            .presets(vec![Field::Mem(0xFF13, vec![0x21])])
            .expectations(vec![Field::Reg8(Reg8::A, 0x21)])
            .build(),
        Case::builder()
            .name("LD SP, HL")
            .opcode([0xF9])
            .presets(vec![Field::Reg16(Reg16::HL, 0xCAFE)])
            .expectations(vec![Field::Reg16(Reg16::SP, 0xCAFE)])
            .build(),
        Case::builder()
            .name("LD (nn), SP")
            .opcode([0x08])
            .extra_instruction_bytes([0xFE, 0xCA])
            .presets(vec![Field::Reg16(Reg16::SP, 0xBEEF)])
            .expectations(vec![Field::Mem(0xCAFE, vec![0xEF, 0xBE])])
            .build(),
    ]);

    for (p, pair) in [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP].into_iter().enumerate() {
        cases.push(
            Case::builder()
                .name(format!("LD {pair}, nn"))
                .opcode([0x01 | (p as u8) << 4])
                .extra_instruction_bytes([0xFE, 0xCA])
                .expectations(vec![Field::Reg16(pair, 0xCAFE)])
                .build(),
        );
    }

    cases.extend(ldhl());
    cases
}

fn ldhl() -> Vec<Case> {
    // (label, n, SP, HL, flags)
    let fixtures = [
        ("positive immediate", 0x01, 0x2100, 0x2101, Flags::empty()),
        ("negative immediate", 0xFF, 0x2100, 0x20FF, Flags::empty()),
        ("H", 0x01, 0xCAEF, 0xCAF0, Flags::H),
        ("H, negative immediate", 0xE1, 0xCA0F, 0xC9F0, Flags::H),
        ("C", 0x10, 0xCAFF, 0xCB0F, Flags::C),
        ("C, negative immediate", 0xE0, 0xCA2F, 0xCA0F, Flags::C),
    ];

    fixtures
        .into_iter()
        .map(|(label, n, sp, hl, flags)| {
            Case::builder()
                .name(format!("LDHL SP, n: {label}"))
                .opcode([0xF8])
                .extra_instruction_bytes([n])
                .presets(vec![Field::Reg16(Reg16::SP, sp)])
                .expectations(with_flags(
                    vec![Field::Reg16(Reg16::HL, hl), Field::Reg16(Reg16::SP, sp)],
                    flags,
                ))
                .build()
        })
        .collect()
}

pub fn stack() -> Vec<Case> {
    let mut cases = Vec::new();

    for (p, pair) in [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF].into_iter().enumerate() {
        // F only stores its top nibble.
        let value = if pair == Reg16::AF { 0xBEE0 } else { 0xBEEF };
        let [lo, hi] = u16::to_le_bytes(value);

        cases.push(
            Case::builder()
                .name(format!("PUSH {pair}"))
                .opcode([0xC5 | (p as u8) << 4])
                .presets(vec![Field::Reg16(pair, value), Field::Reg16(Reg16::SP, 0xCAFE)])
                .expectations(vec![
                    Field::Reg16(Reg16::SP, 0xCAFC),
                    Field::Mem(0xCAFC, vec![lo, hi]),
                ])
                .build(),
        );
        cases.push(
            Case::builder()
                .name(format!("PUSH {pair}: wraparound"))
                .opcode([0xC5 | (p as u8) << 4])
                .presets(vec![Field::Reg16(pair, value)])
                .expectations(vec![
                    Field::Reg16(Reg16::SP, 0xFFFE),
                    Field::Mem(0xFFFE, vec![lo, hi]),
                ])
                .build(),
        );

        for (label, sp, after) in [("", 0xCAFE, 0xCB00), (": wraparound", 0xFFFE, 0x0000)] {
            cases.push(
                Case::builder()
                    .name(format!("POP {pair}{label}"))
                    .opcode([0xC1 | (p as u8) << 4])
                    .presets(vec![
                        Field::Reg16(Reg16::SP, sp),
                        Field::Mem(sp, vec![0xEF, 0xBE]),
                    ])
                    .expectations(vec![Field::Reg16(pair, value), Field::Reg16(Reg16::SP, after)])
                    .build(),
            );
        }
    }

    cases
}

/// Operand sources shared by the 8-bit ALU fixtures: a register, `(HL)`
/// or an immediate.
#[derive(Clone, Copy)]
enum Source {
    Reg(Reg8),
    Indirect,
    Immediate,
}

impl Source {
    fn all() -> impl Iterator<Item = Source> {
        REG8.into_iter()
            .map(Source::Reg)
            .chain([Source::Indirect, Source::Immediate])
    }

    /// Opcode for `base` (the `op A, B` encoding) and its `op A, n` twin.
    fn opcode(self, base: u8, immediate: u8) -> u8 {
        match self {
            Source::Reg(reg) => base | index(reg),
            Source::Indirect => base | HL_INDEX,
            Source::Immediate => immediate,
        }
    }

    fn label(self) -> String {
        match self {
            Source::Reg(reg) => reg.to_string(),
            Source::Indirect => "(HL)".to_string(),
            Source::Immediate => "n".to_string(),
        }
    }

    /// Build a case with A = `a` and the source holding `value`.
    fn case(
        self,
        name: String,
        opcode: u8,
        a: u8,
        value: u8,
        mut presets: Vec<Field>,
        expectations: Vec<Field>,
    ) -> Case {
        presets.insert(0, Field::Reg8(Reg8::A, a));
        let mut extra = Vec::new();
        match self {
            Source::Reg(reg) => presets.push(Field::Reg8(reg, value)),
            Source::Indirect => {
                presets.push(Field::Reg16(Reg16::HL, 0xCAFE));
                presets.push(Field::Mem(0xCAFE, vec![value]));
            }
            Source::Immediate => extra.push(value),
        }

        Case::builder()
            .name(name)
            .opcode([opcode])
            .extra_instruction_bytes(extra)
            .presets(presets)
            .expectations(expectations)
            .build()
    }
}

/// (label, A, operand, carry in, result, flags)
type AluFixture = (&'static str, u8, u8, bool, u8, Flags);

fn alu_cases(mnemonic: &str, base: u8, immediate: u8, fixtures: &[AluFixture]) -> Vec<Case> {
    let mut cases = Vec::new();
    for source in Source::all() {
        let opcode = source.opcode(base, immediate);
        for &(label, a, value, carry, result, flags) in fixtures {
            // With A as the source both operands are the same register.
            if matches!(source, Source::Reg(Reg8::A)) && a != value {
                continue;
            }
            let presets = if carry {
                vec![Field::Flag(Flags::C, true)]
            } else {
                Vec::new()
            };
            cases.push(source.case(
                format!("{mnemonic} A, {}: {label}", source.label()),
                opcode,
                a,
                value,
                presets,
                with_flags(vec![Field::Reg8(Reg8::A, result)], flags),
            ));
        }
    }
    cases
}

pub fn add() -> Vec<Case> {
    alu_cases(
        "ADD",
        0x80,
        0xC6,
        &[
            ("base", 0x21, 0x21, false, 0x42, Flags::empty()),
            ("Z", 0x00, 0x00, false, 0x00, Flags::Z),
            ("H", 0x18, 0x18, false, 0x30, Flags::H),
            ("H, distinct operands", 0x22, 0x0F, false, 0x31, Flags::H),
            ("C", 0x90, 0x90, false, 0x20, Flags::C),
            ("C, distinct operands", 0x20, 0xF0, false, 0x10, Flags::C),
        ],
    )
}

pub fn adc() -> Vec<Case> {
    alu_cases(
        "ADC",
        0x88,
        0xCE,
        &[
            ("base", 0x21, 0x21, false, 0x42, Flags::empty()),
            // 0xFF both ways so a dropped carry-in would show.
            ("carry set", 0xFF, 0xFF, true, 0xFF, Flags::H | Flags::C),
            ("Z", 0x00, 0x00, false, 0x00, Flags::Z),
            ("H", 0x18, 0x18, false, 0x30, Flags::H),
            ("C", 0x90, 0x90, false, 0x20, Flags::C),
        ],
    )
}

pub fn sub() -> Vec<Case> {
    let mut cases = alu_cases(
        "SUB",
        0x90,
        0xD6,
        &[
            ("base", 0x22, 0x21, false, 0x01, Flags::N),
            ("Z", 0x00, 0x00, false, 0x00, Flags::Z | Flags::N),
            ("H", 0x20, 0x01, false, 0x1F, Flags::N | Flags::H),
            ("C", 0x70, 0x90, false, 0xE0, Flags::N | Flags::C),
        ],
    );

    // SUB A, A is zero whatever A holds.
    cases.push(
        Case::builder()
            .name("SUB A, A: nonzero A")
            .opcode([0x97])
            .presets(vec![Field::Reg8(Reg8::A, 0x21)])
            .expectations(with_flags(
                vec![Field::Reg8(Reg8::A, 0x00)],
                Flags::Z | Flags::N,
            ))
            .build(),
    );
    cases
}

pub fn inc() -> Vec<Case> {
    // (label, before, after, flags)
    let fixtures = [
        ("base", 0x21, 0x22, Flags::empty()),
        ("Z", 0xFF, 0x00, Flags::Z | Flags::H),
        ("H", 0x1F, 0x20, Flags::H),
    ];

    let mut cases = Vec::new();
    for (label, before, after, flags) in fixtures {
        for reg in REG8 {
            cases.push(
                Case::builder()
                    .name(format!("INC {reg}: {label}"))
                    .opcode([0x04 | index(reg) << 3])
                    .presets(vec![Field::Reg8(reg, before)])
                    .expectations(with_flags(vec![Field::Reg8(reg, after)], flags))
                    .build(),
            );
        }
        cases.push(
            Case::builder()
                .name(format!("INC (HL): {label}"))
                .opcode([0x34])
                .presets(vec![
                    Field::Mem(0x0CAF, vec![before]),
                    Field::Reg16(Reg16::HL, 0x0CAF),
                ])
                .expectations(with_flags(vec![Field::Mem(0x0CAF, vec![after])], flags))
                .build(),
        );
    }
    cases
}

pub fn misc() -> Vec<Case> {
    vec![Case::builder()
        .name("NOP")
        .opcode([0x00])
        .expectations(Field::flags(Flags::empty()))
        .build()]
}
