//! # Increment and Decrement Instructions
//!
//! This module implements:
//! - INC, DEC: Read-modify-write on memory
//! - INX, INY, DEX, DEY: Index registers (2 cycles)
//!
//! All wrap at 0x00/0xFF and set N and Z from the result. Carry and
//! overflow are untouched.

use super::implied;
use crate::{ExecutionError, MemoryBus, OpcodeMetadata, Status, CPU};

pub(crate) fn increment(p: &mut Status, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    p.set_zn(result);
    result
}

pub(crate) fn decrement(p: &mut Status, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    p.set_zn(result);
    result
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.modify(op, increment)?;
    Ok(())
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    cpu.modify(op, decrement)?;
    Ok(())
}

pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.x = increment(&mut cpu.regs.p, cpu.regs.x);
    Ok(())
}

pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.y = increment(&mut cpu.regs.p, cpu.regs.y);
    Ok(())
}

pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.x = decrement(&mut cpu.regs.p, cpu.regs.x);
    Ok(())
}

pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.y = decrement(&mut cpu.regs.p, cpu.regs.y);
    Ok(())
}
