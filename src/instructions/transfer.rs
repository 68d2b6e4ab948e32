//! # Register Transfer Instructions
//!
//! This module implements register-to-register transfers:
//! - TAX, TAY, TXA, TYA: Copy between A and the index registers (sets N and Z)
//! - TSX: Copy SP to X (sets N and Z)
//! - TXS: Copy X to SP (no flags affected)
//!
//! All use implied addressing and execute in 2 cycles.

use super::implied;
use crate::{ExecutionError, MemoryBus, OpcodeMetadata, CPU};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.x = cpu.regs.a;
    cpu.regs.p.set_zn(cpu.regs.x);
    Ok(())
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.y = cpu.regs.a;
    cpu.regs.p.set_zn(cpu.regs.y);
    Ok(())
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.a = cpu.regs.x;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.a = cpu.regs.y;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.x = cpu.regs.sp;
    cpu.regs.p.set_zn(cpu.regs.x);
    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// Unlike the other transfers, TXS leaves every flag unchanged.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.sp = cpu.regs.x;
    Ok(())
}
