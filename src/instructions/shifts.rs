//! # Shift and Rotate Instructions
//!
//! This module implements shift and rotate operations:
//! - ASL: Arithmetic Shift Left (bit 7 into C, 0 into bit 0)
//! - LSR: Logical Shift Right (bit 0 into C, 0 into bit 7)
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each operates either on the accumulator (2 cycles) or on memory as a
//! read-modify-write instruction. The bit operations themselves are plain
//! functions over the status register so the undocumented RMW combos
//! (SLO, RLA, SRE, RRA) can reuse them.

use crate::{AddressingMode, ExecutionError, MemoryBus, OpcodeMetadata, Status, CPU};

/// Applies a shift or rotate to the accumulator or to memory.
pub(crate) fn execute_shift<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
    shift: fn(&mut Status, u8) -> u8,
) -> Result<(), ExecutionError> {
    if op.addressing_mode == AddressingMode::Accumulator {
        cpu.tick();
        let a = cpu.regs.a;
        cpu.regs.a = shift(&mut cpu.regs.p, a);
    } else {
        cpu.modify(op, shift)?;
    }
    Ok(())
}

pub(crate) fn asl(p: &mut Status, value: u8) -> u8 {
    let result = value << 1;
    p.set(Status::CARRY, value & 0x80 != 0);
    p.set_zn(result);
    result
}

pub(crate) fn lsr(p: &mut Status, value: u8) -> u8 {
    let result = value >> 1;
    p.set(Status::CARRY, value & 0x01 != 0);
    p.set_zn(result);
    result
}

pub(crate) fn rol(p: &mut Status, value: u8) -> u8 {
    let result = (value << 1) | p.get(Status::CARRY) as u8;
    p.set(Status::CARRY, value & 0x80 != 0);
    p.set_zn(result);
    result
}

pub(crate) fn ror(p: &mut Status, value: u8) -> u8 {
    let result = (value >> 1) | ((p.get(Status::CARRY) as u8) << 7);
    p.set(Status::CARRY, value & 0x01 != 0);
    p.set_zn(result);
    result
}
