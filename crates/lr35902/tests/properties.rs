use lr35902::cpu::table::{self, PREFIX};
use lr35902::{Bus, Cpu, Flags, Memory, Step};
use proptest::prelude::*;

const ORIGIN: u16 = 0x0100;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run_program(cpu: &mut Cpu, program: &[u8]) -> Memory {
    init_logger();
    let mut bus = Memory::new();
    bus.load(ORIGIN, program);
    cpu.regs.pc = ORIGIN;
    for _ in 0..count_instructions(program) {
        let step = cpu.step(&mut bus).unwrap();
        assert!(matches!(step, Step::Executed(_)));
    }
    bus
}

fn count_instructions(program: &[u8]) -> usize {
    let mut count = 0;
    let mut offset = 0;
    while offset < program.len() {
        let instruction = match program[offset] {
            PREFIX => program
                .get(offset + 1)
                .and_then(|&opcode| table::prefixed().get(opcode)),
            opcode => table::primary().get(opcode),
        };
        let size = instruction.map_or(1, |instruction| instruction.size as usize);
        offset += size;
        count += 1;
    }
    count
}

fn flags_from(bits: u8) -> Flags {
    Flags::from_bits_truncate(bits)
}

proptest! {
    #[test]
    fn inc_wraps_and_preserves_carry(a in any::<u8>(), f in any::<u8>()) {
        let mut cpu = Cpu::new();
        cpu.regs.a = a;
        cpu.regs.f = flags_from(f);
        let carry = cpu.get_flag(Flags::C);

        run_program(&mut cpu, &[0x3C]);

        let result = a.wrapping_add(1);
        prop_assert_eq!(cpu.regs.a, result);
        prop_assert_eq!(cpu.get_flag(Flags::Z), result == 0);
        prop_assert!(!cpu.get_flag(Flags::N));
        prop_assert_eq!(cpu.get_flag(Flags::H), a & 0x0F == 0x0F);
        prop_assert_eq!(cpu.get_flag(Flags::C), carry);
    }

    #[test]
    fn dec_wraps_and_preserves_carry(a in any::<u8>(), f in any::<u8>()) {
        let mut cpu = Cpu::new();
        cpu.regs.a = a;
        cpu.regs.f = flags_from(f);
        let carry = cpu.get_flag(Flags::C);

        run_program(&mut cpu, &[0x3D]);

        let result = a.wrapping_sub(1);
        prop_assert_eq!(cpu.regs.a, result);
        prop_assert_eq!(cpu.get_flag(Flags::Z), result == 0);
        prop_assert!(cpu.get_flag(Flags::N));
        prop_assert_eq!(cpu.get_flag(Flags::H), a & 0x0F == 0x00);
        prop_assert_eq!(cpu.get_flag(Flags::C), carry);
    }

    #[test]
    fn inc_dec_round_trip(value in any::<u8>(), f in any::<u8>()) {
        // INC B / DEC B / DEC C / INC C
        let mut cpu = Cpu::new();
        cpu.regs.b = value;
        cpu.regs.c = value;
        cpu.regs.f = flags_from(f);
        let carry = cpu.get_flag(Flags::C);

        run_program(&mut cpu, &[0x04, 0x05, 0x0D, 0x0C]);

        prop_assert_eq!(cpu.regs.b, value);
        prop_assert_eq!(cpu.regs.c, value);
        prop_assert_eq!(cpu.get_flag(Flags::C), carry);
    }

    #[test]
    fn prefixed_programs_split_on_instruction_boundaries(value in any::<u8>()) {
        // SWAP B / SWAP B / INC B
        let mut cpu = Cpu::new();
        cpu.regs.b = value;

        run_program(&mut cpu, &[0xCB, 0x30, 0xCB, 0x30, 0x04]);

        prop_assert_eq!(cpu.regs.b, value.wrapping_add(1));
        prop_assert_eq!(cpu.regs.pc, ORIGIN + 5);
    }

    #[test]
    fn adc_matches_widened_sum(a in any::<u8>(), n in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = Cpu::new();
        cpu.regs.a = a;
        cpu.set_flag(Flags::C, carry);

        run_program(&mut cpu, &[0xCE, n]);

        let sum = a as u16 + n as u16 + carry as u16;
        prop_assert_eq!(cpu.regs.a, sum as u8);
        prop_assert_eq!(cpu.get_flag(Flags::Z), sum as u8 == 0);
        prop_assert!(!cpu.get_flag(Flags::N));
        prop_assert_eq!(cpu.get_flag(Flags::H), (a & 0x0F) + (n & 0x0F) + carry as u8 > 0x0F);
        prop_assert_eq!(cpu.get_flag(Flags::C), sum > 0xFF);
    }

    #[test]
    fn cp_orders_without_writing_a(a in any::<u8>(), n in any::<u8>()) {
        let mut cpu = Cpu::new();
        cpu.regs.a = a;

        run_program(&mut cpu, &[0xFE, n]);

        prop_assert_eq!(cpu.regs.a, a);
        prop_assert_eq!(cpu.get_flag(Flags::Z), a == n);
        prop_assert!(cpu.get_flag(Flags::N));
        prop_assert_eq!(cpu.get_flag(Flags::C), a < n);
    }

    #[test]
    fn sub_a_a_is_always_zero(a in any::<u8>(), f in any::<u8>()) {
        let mut cpu = Cpu::new();
        cpu.regs.a = a;
        cpu.regs.f = flags_from(f);

        run_program(&mut cpu, &[0x97]);

        prop_assert_eq!(cpu.regs.a, 0);
        prop_assert_eq!(cpu.regs.f, Flags::Z | Flags::N);
    }

    #[test]
    fn push_pop_round_trips_at_any_stack_pointer(sp in any::<u16>(), value in any::<u16>()) {
        // Keep the pushed word off the two program bytes.
        prop_assume!(!(0x00FF..=0x0101).contains(&sp.wrapping_sub(2)));

        let mut cpu = Cpu::new();
        cpu.regs.sp = sp;
        cpu.regs.set_bc(value);

        // PUSH BC / POP DE
        let mut bus = run_program(&mut cpu, &[0xC5, 0xD1]);

        prop_assert_eq!(cpu.regs.de(), value);
        prop_assert_eq!(cpu.regs.sp, sp);
        prop_assert_eq!(bus.read16(sp.wrapping_sub(2)), value);
    }

    #[test]
    fn pop_af_never_sets_low_flag_bits(word in any::<u16>()) {
        let mut cpu = Cpu::new();
        cpu.regs.sp = 0xC000;

        init_logger();
        let mut bus = Memory::new();
        bus.load(ORIGIN, &[0xF1]);
        bus.write16(0xC000, word);
        cpu.regs.pc = ORIGIN;
        cpu.step(&mut bus).unwrap();

        prop_assert_eq!(cpu.regs.af(), word & 0xFFF0);
    }
}
