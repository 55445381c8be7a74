//! Arithmetic kernels. Each returns the result together with the flags it
//! computes and nothing else; bits an instruction forces to 0 or 1 come
//! from its [`FlagPolicy`](super::FlagPolicy).

use super::Flags;

fn zero(result: u8) -> Flags {
    if result == 0 {
        Flags::Z
    } else {
        Flags::empty()
    }
}

/// A + value (+ carry): Z, H and C.
///
/// The carry is part of the same widened sum that produces the outgoing
/// carry, so `0xFF + 0xFF + 1` still reports C.
pub(super) fn add8(a: u8, value: u8, carry: bool) -> (u8, Flags) {
    let carry = carry as u16;
    let sum = a as u16 + value as u16 + carry;
    let result = sum as u8;

    let mut flags = zero(result);
    flags.set(Flags::H, (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry > 0x0F);
    flags.set(Flags::C, sum > 0xFF);
    (result, flags)
}

/// A - value (- carry): Z, H and C as borrows. Shared by SUB, SBC and CP.
pub(super) fn sub8(a: u8, value: u8, carry: bool) -> (u8, Flags) {
    let carry = carry as u16;
    let subtrahend = value as u16 + carry;
    let result = (a as u16).wrapping_sub(subtrahend) as u8;

    let mut flags = zero(result);
    flags.set(Flags::H, ((value & 0x0F) as u16 + carry) > (a & 0x0F) as u16);
    flags.set(Flags::C, subtrahend > a as u16);
    (result, flags)
}

/// AND, OR and XOR compute only Z.
pub(super) fn logic(result: u8) -> (u8, Flags) {
    (result, zero(result))
}

/// BCD correction of A using the N, H and C left by the previous add or
/// subtract. Computes Z and C.
pub(super) fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let subtract = flags.contains(Flags::N);
    let mut correction = 0u8;
    if flags.contains(Flags::H) || (!subtract && a & 0x0F > 0x09) {
        correction |= 0x06;
    }
    if flags.contains(Flags::C) || (!subtract && a > 0x99) {
        correction |= 0x60;
    }

    let result = if subtract {
        a.wrapping_sub(correction)
    } else {
        a.wrapping_add(correction)
    };

    let mut out = zero(result);
    out.set(Flags::C, correction & 0x60 != 0);
    (result, out)
}

/// 8-bit increment: Z and H.
pub(super) fn inc8(value: u8) -> (u8, Flags) {
    let result = value.wrapping_add(1);
    let mut flags = zero(result);
    flags.set(Flags::H, value & 0x0F == 0x0F);
    (result, flags)
}

/// 8-bit decrement: Z and H, where H is the borrow out of bit 4.
pub(super) fn dec8(value: u8) -> (u8, Flags) {
    let result = value.wrapping_sub(1);
    let mut flags = zero(result);
    flags.set(Flags::H, value & 0x0F == 0);
    (result, flags)
}

/// ADD HL,rr: H and C are the carries out of bits 11 and 15.
pub(super) fn add16(hl: u16, value: u16) -> (u16, Flags) {
    let (result, carry) = hl.overflowing_add(value);
    let mut flags = Flags::empty();
    flags.set(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
    flags.set(Flags::C, carry);
    (result, flags)
}

/// ADD SP,n and LDHL SP,n: `base` plus a signed byte. H and C come from
/// the unsigned add of the low bytes.
pub(super) fn add16_signed(base: u16, imm8: u8) -> (u16, Flags) {
    let low = (base & 0x00FF) as u8;
    let mut flags = Flags::empty();
    flags.set(Flags::H, (low & 0x0F) + (imm8 & 0x0F) > 0x0F);
    flags.set(Flags::C, low.checked_add(imm8).is_none());
    (base.wrapping_add(imm8 as i8 as u16), flags)
}
