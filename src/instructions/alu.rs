//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic into the accumulator
//! - CMP, CPX, CPY: Compare a register with memory
//! - BIT: Test bits in memory against the accumulator
//!
//! ## Decimal Mode
//!
//! With the D flag set and [`DecimalMode::Nmos`] configured, ADC and SBC
//! operate on packed BCD exactly as the NMOS part does, including its
//! documented flag behaviour for invalid BCD inputs:
//!
//! - ADC: Z comes from the binary sum; N and V from the intermediate result
//!   after the low nibble is adjusted; C from the fully adjusted sum.
//! - SBC: every flag comes from the binary subtraction; only A is adjusted.
//!
//! With [`DecimalMode::Disabled`] the D flag is ignored.

use crate::{DecimalMode, ExecutionError, MemoryBus, OpcodeMetadata, Status, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator.
///
/// Flags affected:
/// - C: Set if the unsigned result exceeds 0xFF (decimal: 0x99)
/// - Z: Set if the binary result is 0
/// - V: Set on signed overflow
/// - N: Set if bit 7 of the result is set
///
/// # Examples
///
/// ```
/// use lib6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0x69, 0x50]); // ADC #$50
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x50);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0xA0);
/// assert!(cpu.flag_v()); // positive + positive = negative
/// assert!(!cpu.flag_c());
/// ```
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    add_with_carry(cpu, value);
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes A - M - (1 - C). C is set when no borrow occurred.
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    subtract_with_carry(cpu, value);
    Ok(())
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.a &= value;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.a |= value;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.a ^= value;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// Flags affected:
/// - C: Set if A >= M (unsigned)
/// - Z: Set if A == M
/// - N: Set if bit 7 of (A - M) is set
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    compare(&mut cpu.regs.p, cpu.regs.a, value);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    compare(&mut cpu.regs.p, cpu.regs.x, value);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    compare(&mut cpu.regs.p, cpu.regs.y, value);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Flags affected:
/// - Z: Set if (A & M) == 0
/// - V: Copied from bit 6 of M
/// - N: Copied from bit 7 of M
///
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    let p = &mut cpu.regs.p;
    p.set(Status::ZERO, cpu.regs.a & value == 0);
    p.set(Status::OVERFLOW, value & 0x40 != 0);
    p.set(Status::NEGATIVE, value & 0x80 != 0);
    Ok(())
}

/// Sets C, Z and N for `register - value`.
pub(crate) fn compare(p: &mut Status, register: u8, value: u8) {
    p.set(Status::CARRY, register >= value);
    p.set_zn(register.wrapping_sub(value));
}

/// True when D is set and the configuration honours it.
fn decimal_active<M: MemoryBus>(cpu: &CPU<M>) -> bool {
    cpu.config.decimal_mode == DecimalMode::Nmos && cpu.regs.p.get(Status::DECIMAL)
}

/// ADC core, shared with RRA.
pub(crate) fn add_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    if decimal_active(cpu) {
        let a = cpu.regs.a;
        let carry = cpu.regs.p.get(Status::CARRY) as u16;
        let p = &mut cpu.regs.p;

        let binary = (a as u16 + value as u16 + carry) as u8;
        p.set(Status::ZERO, binary == 0);

        let mut low = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry;
        if low >= 0x0A {
            low = ((low + 0x06) & 0x0F) + 0x10;
        }

        // N and V see the sum before the high nibble is adjusted
        let signed = (a & 0xF0) as i8 as i16 + (value & 0xF0) as i8 as i16 + low as i16;
        p.set(Status::NEGATIVE, signed & 0x80 != 0);
        p.set(Status::OVERFLOW, !(-128..=127).contains(&signed));

        let mut sum = (a & 0xF0) as u16 + (value & 0xF0) as u16 + low;
        if sum >= 0xA0 {
            sum += 0x60;
        }
        p.set(Status::CARRY, sum >= 0x100);
        cpu.regs.a = sum as u8;
    } else {
        binary_add(cpu, value);
    }
}

/// SBC core, shared with ISC.
pub(crate) fn subtract_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    if decimal_active(cpu) {
        let a = cpu.regs.a;
        let borrow = 1 - cpu.regs.p.get(Status::CARRY) as i16;

        // Flags match the binary subtraction
        binary_add(cpu, !value);

        let mut low = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
        if low < 0 {
            low = ((low - 0x06) & 0x0F) - 0x10;
        }
        let mut result = (a & 0xF0) as i16 - (value & 0xF0) as i16 + low;
        if result < 0 {
            result -= 0x60;
        }
        cpu.regs.a = result as u8;
    } else {
        binary_add(cpu, !value);
    }
}

fn binary_add<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.regs.a;
    let carry = cpu.regs.p.get(Status::CARRY) as u16;
    let sum = a as u16 + value as u16 + carry;
    let result = sum as u8;

    let p = &mut cpu.regs.p;
    p.set(Status::CARRY, sum > 0xFF);
    p.set(Status::OVERFLOW, !(a ^ value) & (a ^ result) & 0x80 != 0);
    p.set_zn(result);
    cpu.regs.a = result;
}
