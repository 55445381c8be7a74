use lr35902::{Flags, Reg16, Reg8};
use lr35902_conformance::{run_all, suite, Case, Field};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn loads() {
    init_logger();
    run_all(&suite::loads()).unwrap();
}

#[test]
fn stack() {
    init_logger();
    run_all(&suite::stack()).unwrap();
}

#[test]
fn add_and_adc() {
    init_logger();
    run_all(&suite::add()).unwrap();
    run_all(&suite::adc()).unwrap();
}

#[test]
fn sub() {
    init_logger();
    run_all(&suite::sub()).unwrap();
}

#[test]
fn inc() {
    init_logger();
    run_all(&suite::inc()).unwrap();
}

#[test]
fn nop() {
    init_logger();
    run_all(&suite::misc()).unwrap();
}

#[test]
fn suite_covers_every_family() {
    let names: Vec<String> = suite::all().into_iter().map(|case| case.name).collect();
    for prefix in ["LD ", "LDD ", "LDI ", "LDH ", "LDHL ", "PUSH ", "POP ", "ADD ", "ADC ", "SUB ", "INC ", "NOP"] {
        assert!(
            names.iter().any(|name| name.starts_with(prefix)),
            "no case for {prefix:?}"
        );
    }
}

#[test]
fn prefixed_case_runs_through_the_harness() {
    init_logger();
    let case = Case::builder()
        .name("SWAP A")
        .opcode([0xCB, 0x37])
        .presets(vec![Field::Reg8(Reg8::A, 0xF1)])
        .expectations(vec![Field::Reg8(Reg8::A, 0x1F), Field::Flag(Flags::Z, false)])
        .build();

    case.run().unwrap();
}

#[test]
fn control_flow_cases_name_pc_explicitly() {
    init_logger();
    let case = Case::builder()
        .name("CALL nn")
        .opcode([0xCD])
        .extra_instruction_bytes([0x00, 0x20])
        .presets(vec![Field::Reg16(Reg16::SP, 0xFFFE)])
        .expectations(vec![
            Field::Reg16(Reg16::PC, 0x2000),
            Field::Reg16(Reg16::SP, 0xFFFC),
            Field::Mem(0xFFFC, vec![0x03, 0x01]),
        ])
        .build();

    case.run().unwrap();
}

#[test]
fn mismatches_are_all_reported() {
    let case = Case::builder()
        .name("wrong on purpose")
        .opcode([0x3C])
        .expectations(vec![
            Field::Reg8(Reg8::A, 0x02),
            Field::Flag(Flags::Z, true),
        ])
        .build();

    let message = format!("{:#}", case.run().unwrap_err());

    assert!(message.contains("wrong on purpose"), "{message}");
    assert!(message.contains("A: expected 0x02, got 0x01"), "{message}");
    assert!(message.contains("expected true, got false"), "{message}");
}

#[test]
fn unimplemented_opcode_fails_the_case() {
    let case = Case::builder().name("hole").opcode([0xD3]).build();

    let message = format!("{:#}", case.run().unwrap_err());

    assert!(message.contains("case `hole`"), "{message}");
    assert!(message.contains("unimplemented opcode 0xD3 at PC=0x0100"), "{message}");
}

#[test]
fn run_all_counts_passes_and_collects_failures() {
    let good = Case::builder().name("NOP").opcode([0x00]).build();
    let bad = Case::builder().name("hole").opcode([0xFD]).build();

    assert_eq!(run_all(std::slice::from_ref(&good)).unwrap(), 1);

    let message = format!("{:#}", run_all(&[good, bad]).unwrap_err());
    assert!(message.starts_with("1 of 2 cases failed"), "{message}");
}
