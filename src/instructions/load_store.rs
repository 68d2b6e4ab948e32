//! # Load and Store Instructions
//!
//! This module implements register load and store operations:
//! - LDA, LDX, LDY: Load a register from memory (sets N and Z)
//! - STA, STX, STY: Store a register to memory (no flags affected)
//!
//! Loads pay the extra cycle only when an indexed access crosses a page.
//! Stores always spend it, so `STA abs,X` is 5 cycles whatever the index.

use crate::{Access, ExecutionError, MemoryBus, OpcodeMetadata, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Loads a byte from memory into the accumulator.
///
/// Flags affected:
/// - Z: Set if A = 0
/// - N: Set if bit 7 of A is set
///
/// # Examples
///
/// ```
/// use lib6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xA9, 0x80]); // LDA #$80
///
/// let mut cpu = CPU::new(memory);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_n());
/// assert!(!cpu.flag_z());
/// ```
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.a = value;
    cpu.regs.p.set_zn(value);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.x = value;
    cpu.regs.p.set_zn(value);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.y = value;
    cpu.regs.p.set_zn(value);
    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Writes A to the effective address. An immediate operand has no address
/// and is rejected with `InvalidAddressingMode`.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(op, Access::Write)?;
    cpu.write(addr, cpu.regs.a);
    Ok(())
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(op, Access::Write)?;
    cpu.write(addr, cpu.regs.x);
    Ok(())
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(op, Access::Write)?;
    cpu.write(addr, cpu.regs.y);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddressingMode, FlatMemory, Mnemonic, OPCODE_TABLE};

    fn setup_cpu() -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        CPU::new(mem)
    }

    #[test]
    fn test_store_rejects_immediate() {
        let mut cpu = setup_cpu();
        let op = OpcodeMetadata {
            mnemonic: Mnemonic::Sta,
            addressing_mode: AddressingMode::Immediate,
            base_cycles: 2,
            size_bytes: 2,
            documented: false,
        };

        assert_eq!(
            execute_sta(&mut cpu, &op),
            Err(ExecutionError::InvalidAddressingMode {
                mnemonic: Mnemonic::Sta,
                mode: AddressingMode::Immediate,
            })
        );
        // Nothing fetched
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn test_load_rejects_implied() {
        let mut cpu = setup_cpu();
        let op = OpcodeMetadata {
            addressing_mode: AddressingMode::Implied,
            ..OPCODE_TABLE[0xA9]
        };

        assert!(matches!(
            execute_lda(&mut cpu, &op),
            Err(ExecutionError::InvalidAddressingMode { .. })
        ));
    }
}
