//! Instruction routines, grouped by family.
//!
//! Every routine has the [`ExecFn`](super::table::ExecFn) shape: it gets the
//! operands already resolved by the decoder and writes its raw flag results
//! into F. The instruction's flag policy is applied afterwards by
//! [`Cpu::execute`](super::Cpu::execute).

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
