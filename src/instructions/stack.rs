//! # Stack Instructions
//!
//! This module implements stack operations:
//! - PHA: Push Accumulator (3 cycles)
//! - PHP: Push Processor Status (3 cycles)
//! - PLA: Pull Accumulator (4 cycles)
//! - PLP: Pull Processor Status (4 cycles)
//!
//! The stack lives in page one (0x0100-0x01FF) and grows downward. SP wraps
//! within the page on overflow and underflow.

use super::implied;
use crate::{ExecutionError, MemoryBus, OpcodeMetadata, Status, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.push(cpu.regs.a);
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has the Break and unused bits set.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.push(cpu.regs.p.for_push(true));
    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Flags affected:
/// - Z: Set if the pulled value is 0
/// - N: Set if bit 7 of the pulled value is set
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.tick();
    let value = cpu.pull();
    cpu.regs.a = value;
    cpu.regs.p.set_zn(value);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Every flag is restored from the stack except Break, which is not a
/// register bit; the unused bit stays set.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.tick();
    let value = cpu.pull();
    cpu.regs.p = Status::from_pulled(value);
    Ok(())
}
