//! CB-prefixed instructions: rotates, shifts, SWAP and the bit operations.

use super::{Arg, Args, Bus, Cpu, Flags};

/// A rotate/shift primitive: takes the operand and the incoming carry,
/// returns the result and the bit shifted out.
pub(super) type ShiftOp = fn(u8, bool) -> (u8, bool);

pub(super) fn rlc(value: u8, _carry: bool) -> (u8, bool) {
    (value.rotate_left(1), value & 0x80 != 0)
}

pub(super) fn rrc(value: u8, _carry: bool) -> (u8, bool) {
    (value.rotate_right(1), value & 0x01 != 0)
}

pub(super) fn rl(value: u8, carry: bool) -> (u8, bool) {
    ((value << 1) | carry as u8, value & 0x80 != 0)
}

pub(super) fn rr(value: u8, carry: bool) -> (u8, bool) {
    ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
}

fn sla(value: u8, _carry: bool) -> (u8, bool) {
    (value << 1, value & 0x80 != 0)
}

fn sra(value: u8, _carry: bool) -> (u8, bool) {
    ((value >> 1) | (value & 0x80), value & 0x01 != 0)
}

fn srl(value: u8, _carry: bool) -> (u8, bool) {
    (value >> 1, value & 0x01 != 0)
}

fn swap(value: u8, _carry: bool) -> (u8, bool) {
    (value.rotate_left(4), false)
}

impl Cpu {
    /// Apply `op` to the single operand in place; Z from the result, C
    /// from the bit shifted out.
    fn shift_in_place(&mut self, bus: &mut dyn Bus, args: &Args, op: ShiftOp) {
        let target = args[0];
        let value = self.read_arg8(bus, target);
        let (result, carry) = op(value, self.get_flag(Flags::C));
        self.write_arg8(bus, target, result);

        self.set_flag(Flags::Z, result == 0);
        self.set_flag(Flags::C, carry);
    }

    pub(in crate::cpu) fn exec_rlc(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, rlc);
    }

    pub(in crate::cpu) fn exec_rrc(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, rrc);
    }

    pub(in crate::cpu) fn exec_rl(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, rl);
    }

    pub(in crate::cpu) fn exec_rr(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, rr);
    }

    pub(in crate::cpu) fn exec_sla(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, sla);
    }

    pub(in crate::cpu) fn exec_sra(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, sra);
    }

    pub(in crate::cpu) fn exec_swap(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, swap);
    }

    pub(in crate::cpu) fn exec_srl(&mut self, bus: &mut dyn Bus, args: &Args) {
        self.shift_in_place(bus, args, srl);
    }

    /// BIT b, r: Z set when the bit is clear. The operand is not written.
    pub(in crate::cpu) fn exec_bit(&mut self, bus: &mut dyn Bus, args: &Args) {
        let (bit, target) = bit_args(args);
        let value = self.read_arg8(bus, target);
        self.set_flag(Flags::Z, value & (1 << bit) == 0);
    }

    pub(in crate::cpu) fn exec_res(&mut self, bus: &mut dyn Bus, args: &Args) {
        let (bit, target) = bit_args(args);
        let value = self.read_arg8(bus, target);
        self.write_arg8(bus, target, value & !(1 << bit));
    }

    pub(in crate::cpu) fn exec_set(&mut self, bus: &mut dyn Bus, args: &Args) {
        let (bit, target) = bit_args(args);
        let value = self.read_arg8(bus, target);
        self.write_arg8(bus, target, value | (1 << bit));
    }
}

fn bit_args(args: &Args) -> (u8, Arg) {
    match args[..] {
        [Arg::Bit(bit), target] => (bit, target),
        _ => unreachable!("bit operation without a bit index: {args:?}"),
    }
}
