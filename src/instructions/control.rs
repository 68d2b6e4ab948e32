//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address (absolute or indirect)
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - BRK: Force Interrupt
//! - NOP: No operation (including the undocumented multi-byte forms)
//!
//! JSR pushes the address of its own last byte (return address - 1), high
//! byte first; RTS pulls it and adds one. BRK is a two-byte instruction whose
//! second byte is skipped, so the pushed return address is BRK + 2.

use super::implied;
use crate::addressing::invalid_mode;
use crate::interrupts::Interrupt;
use crate::{
    Access, AddressingMode, ExecutionError, MemoryBus, OpcodeMetadata, Operand, Status, CPU,
};

/// Executes the JMP (Jump) instruction.
///
/// `JMP ($xxFF)` reads the pointer's high byte from `$xx00`, as the NMOS
/// part does.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    if !matches!(
        op.addressing_mode,
        AddressingMode::Absolute | AddressingMode::Indirect
    ) {
        return Err(invalid_mode(op));
    }

    match cpu.resolve(op.addressing_mode, Access::Read) {
        Operand::Address(target) => {
            cpu.regs.pc = target;
            Ok(())
        }
        _ => Err(invalid_mode(op)),
    }
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Cycle order: target low byte, one internal cycle, push PCH, push PCL,
/// target high byte. The pushed address is that of the high byte.
///
/// # Examples
///
/// ```
/// use lib6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x02);
/// memory.load(0x0200, &[0x20, 0x00, 0x03]); // JSR $0300
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.step(), Ok(6));
///
/// assert_eq!(cpu.pc(), 0x0300);
/// assert_eq!(cpu.sp(), 0xFB);
/// assert_eq!(cpu.memory().peek(0x01FD), 0x02);
/// assert_eq!(cpu.memory().peek(0x01FC), 0x02);
/// ```
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    if op.addressing_mode != AddressingMode::Absolute {
        return Err(invalid_mode(op));
    }

    let lo = cpu.fetch_byte();
    cpu.tick();

    let [ret_lo, ret_hi] = cpu.regs.pc.to_le_bytes();
    cpu.push(ret_hi);
    cpu.push(ret_lo);

    let hi = cpu.read(cpu.regs.pc);
    cpu.regs.pc = u16::from_le_bytes([lo, hi]);
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.tick();

    let lo = cpu.pull();
    let hi = cpu.pull();
    cpu.tick();

    cpu.regs.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls P, then PC. Unlike RTS, the pulled PC is used as is.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.tick();

    let status = cpu.pull();
    cpu.regs.p = Status::from_pulled(status);

    let lo = cpu.pull();
    let hi = cpu.pull();
    cpu.regs.pc = u16::from_le_bytes([lo, hi]);
    Ok(())
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Skips the signature byte, pushes PC and P with Break set, sets I and
/// jumps through the IRQ vector at $FFFE/F.
///
/// Cycle timing: 7 cycles (fixed)
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    implied(cpu, op)?;
    cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
    cpu.enter_interrupt(Interrupt::Brk);
    Ok(())
}

/// Executes the NOP (No Operation) instruction.
///
/// The documented NOP is one byte. The undocumented forms read their
/// operand like a load and spend the same cycles, page-cross penalty
/// included.
pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    if op.addressing_mode == AddressingMode::Implied {
        cpu.tick();
    } else {
        cpu.read_operand(op)?;
    }
    Ok(())
}
