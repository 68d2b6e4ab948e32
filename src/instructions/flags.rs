//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC / SEC: Clear / Set Carry Flag
//! - CLI / SEI: Clear / Set Interrupt Disable
//! - CLD / SED: Clear / Set Decimal Mode
//! - CLV: Clear Overflow Flag
//!
//! These instructions use implied addressing mode and execute in 2 cycles.
//! A change to I takes effect for interrupts sampled at the next instruction
//! boundary.

use super::implied;
use crate::{ExecutionError, MemoryBus, OpcodeMetadata, Status, CPU};

/// Sets or clears a single status flag, leaving every other bit unchanged.
///
/// # Examples
///
/// ```
/// use lib6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0x38, 0xF8]); // SEC; SED
///
/// let mut cpu = CPU::new(memory);
/// cpu.step().unwrap();
/// cpu.step().unwrap();
///
/// assert!(cpu.flag_c());
/// assert!(cpu.flag_d());
/// assert_eq!(cpu.cycles(), 7 + 4);
/// ```
pub(crate) fn execute_flag<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
    flag: Status,
    value: bool,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.p.set(flag, value);
    Ok(())
}
