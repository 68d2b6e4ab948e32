//! # Branch Instructions
//!
//! This module implements the conditional branch operations:
//! - BCC / BCS: Branch on Carry clear / set
//! - BNE / BEQ: Branch on Zero clear / set
//! - BPL / BMI: Branch on Negative clear / set
//! - BVC / BVS: Branch on Overflow clear / set
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! from the address of the next instruction.
//! Cycle timing varies based on whether the branch is taken and whether a page boundary is crossed.

use crate::addressing::invalid_mode;
use crate::{
    page_crossed, Access, AddressingMode, ExecutionError, MemoryBus, OpcodeMetadata, Operand,
    Status, CPU,
};

/// Branches if `flag` equals `expected`.
///
/// Cycle timing:
/// - 2 cycles if branch not taken
/// - 3 cycles if branch taken to same page
/// - 4 cycles if branch taken to different page
///
/// No flags are affected.
///
/// # Examples
///
/// ```
/// use lib6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0xF0);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x80F0, &[0xD0, 0x10]); // BNE +16
///
/// let mut cpu = CPU::new(memory);
///
/// // Z clear after reset: taken, 0x80F2 + 0x10 crosses into page 0x81
/// assert_eq!(cpu.step(), Ok(4));
/// assert_eq!(cpu.pc(), 0x8102);
/// ```
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
    flag: Status,
    expected: bool,
) -> Result<(), ExecutionError> {
    if op.addressing_mode != AddressingMode::Relative {
        return Err(invalid_mode(op));
    }

    let target = match cpu.resolve(AddressingMode::Relative, Access::Read) {
        Operand::Address(target) => target,
        _ => return Err(invalid_mode(op)),
    };

    if cpu.regs.p.get(flag) == expected {
        cpu.tick();
        if page_crossed(cpu.regs.pc, target) {
            cpu.tick();
        }
        cpu.regs.pc = target;
    }

    Ok(())
}
