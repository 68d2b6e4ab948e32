//! # Undocumented NMOS Instructions
//!
//! Stable undocumented opcodes, executed only under
//! [`UndefinedOpcodePolicy::Nmos`](crate::UndefinedOpcodePolicy::Nmos):
//!
//! | Mnemonic | Effect                                   |
//! |----------|------------------------------------------|
//! | LAX      | LDA and LDX of the same byte             |
//! | SAX      | store A & X                              |
//! | DCP      | DEC memory, then CMP                     |
//! | ISC      | INC memory, then SBC                     |
//! | SLO      | ASL memory, then ORA                     |
//! | RLA      | ROL memory, then AND                     |
//! | SRE      | LSR memory, then EOR                     |
//! | RRA      | ROR memory, then ADC                     |
//! | ANC      | AND #imm, C = N                          |
//! | ALR      | AND #imm, then LSR A                     |
//! | ARR      | AND #imm, then ROR A with odd flags      |
//! | SBX      | X = (A & X) - #imm, flags as CMP         |
//! | JAM      | halts the processor until reset          |
//!
//! The RMW combos spend exactly the cycles of the underlying RMW
//! instruction in the same mode, and 8 in the indirect modes.

use log::warn;

use super::alu::{add_with_carry, compare, subtract_with_carry};
use super::inc_dec::{decrement, increment};
use super::shifts::{asl, lsr, rol, ror};
use crate::{Access, DecimalMode, ExecutionError, MemoryBus, OpcodeMetadata, Status, CPU};

/// LAX: load A and X with the same byte.
pub(crate) fn execute_lax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.a = value;
    cpu.regs.x = value;
    cpu.regs.p.set_zn(value);
    Ok(())
}

/// SAX: store A & X. No flags affected.
pub(crate) fn execute_sax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(op, Access::Write)?;
    cpu.write(addr, cpu.regs.a & cpu.regs.x);
    Ok(())
}

/// DCP: decrement memory, then compare it with A.
pub(crate) fn execute_dcp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.modify(op, decrement)?;
    compare(&mut cpu.regs.p, cpu.regs.a, value);
    Ok(())
}

/// ISC: increment memory, then subtract it from A.
pub(crate) fn execute_isc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.modify(op, increment)?;
    subtract_with_carry(cpu, value);
    Ok(())
}

/// SLO: shift memory left, then OR it into A.
pub(crate) fn execute_slo<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.modify(op, asl)?;
    cpu.regs.a |= value;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// RLA: rotate memory left, then AND it into A.
pub(crate) fn execute_rla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.modify(op, rol)?;
    cpu.regs.a &= value;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// SRE: shift memory right, then EOR it into A.
pub(crate) fn execute_sre<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.modify(op, lsr)?;
    cpu.regs.a ^= value;
    cpu.regs.p.set_zn(cpu.regs.a);
    Ok(())
}

/// RRA: rotate memory right, then add it to A with the carry the rotate produced.
pub(crate) fn execute_rra<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.modify(op, ror)?;
    add_with_carry(cpu, value);
    Ok(())
}

/// ANC: AND immediate, then copy N into C.
pub(crate) fn execute_anc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    cpu.regs.a &= value;
    cpu.regs.p.set_zn(cpu.regs.a);
    cpu.regs.p.set(Status::CARRY, cpu.regs.a & 0x80 != 0);
    Ok(())
}

/// ALR: AND immediate, then shift A right.
pub(crate) fn execute_alr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    let masked = cpu.regs.a & value;
    cpu.regs.a = lsr(&mut cpu.regs.p, masked);
    Ok(())
}

/// ARR: AND immediate, then rotate A right.
///
/// In binary mode C takes bit 6 of the result and V is bit 6 XOR bit 5.
/// In decimal mode N, Z and V come from the rotate and the result is then
/// BCD-fixed one nibble at a time, with C set by the high-nibble fixup.
pub(crate) fn execute_arr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    let masked = cpu.regs.a & value;
    let carry_in = cpu.regs.p.get(Status::CARRY) as u8;
    let mut result = (masked >> 1) | (carry_in << 7);

    let decimal = cpu.config.decimal_mode == DecimalMode::Nmos
        && cpu.regs.p.get(Status::DECIMAL);
    let p = &mut cpu.regs.p;
    p.set_zn(result);

    if decimal {
        p.set(Status::OVERFLOW, (masked ^ result) & 0x40 != 0);

        let low = masked & 0x0F;
        let high = masked >> 4;
        if low + (low & 0x01) > 5 {
            result = (result & 0xF0) | (result.wrapping_add(6) & 0x0F);
        }
        let fix_high = high + (high & 0x01) > 5;
        if fix_high {
            result = result.wrapping_add(0x60);
        }
        p.set(Status::CARRY, fix_high);
    } else {
        p.set(Status::CARRY, result & 0x40 != 0);
        p.set(Status::OVERFLOW, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
    }

    cpu.regs.a = result;
    Ok(())
}

/// SBX: X = (A & X) - immediate, without borrow. Flags as CMP.
pub(crate) fn execute_sbx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(op)?;
    let masked = cpu.regs.a & cpu.regs.x;
    compare(&mut cpu.regs.p, masked, value);
    cpu.regs.x = masked.wrapping_sub(value);
    Ok(())
}

/// JAM: the processor stops fetching and only reset recovers it.
///
/// PC is left on the opcode and every later step reports the same error.
pub(crate) fn execute_jam<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.tick();
    let pc = cpu.regs.pc.wrapping_sub(1);
    cpu.regs.pc = pc;
    cpu.jammed = Some(opcode);

    warn!("Processor jammed by opcode {:#04X} at {:#06X}", opcode, pc);
    Err(ExecutionError::Jammed { opcode, pc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CpuConfig, FlatMemory, UndefinedOpcodePolicy};

    fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        mem.load(0x8000, program);
        CPU::with_config(
            mem,
            CpuConfig::default().with_undefined_opcodes(UndefinedOpcodePolicy::Nmos),
        )
    }

    #[test]
    fn test_arr_binary_flags() {
        let mut cpu = setup_cpu(&[0x6B, 0xFF]); // ARR #$FF
        cpu.set_a(0xC0);
        cpu.set_flag_c(true);

        cpu.step().unwrap();

        // 0xC0 >> 1 | 0x80 = 0xE0
        assert_eq!(cpu.a(), 0xE0);
        assert!(cpu.flag_c());
        assert!(!cpu.flag_v());
        assert!(cpu.flag_n());
    }

    #[test]
    fn test_arr_decimal_fixup() {
        let mut cpu = setup_cpu(&[0x6B, 0xFF]);
        cpu.set_flag_d(true);
        cpu.set_a(0xFF);

        cpu.step().unwrap();

        // 0x7F, then low nibble fix 0x75, high nibble fix 0xD5
        assert_eq!(cpu.a(), 0xD5);
        assert!(cpu.flag_c());
    }

    #[test]
    fn test_jam_halts_until_reset() {
        let mut cpu = setup_cpu(&[0x02]);
        let expected = Err(ExecutionError::Jammed {
            opcode: 0x02,
            pc: 0x8000,
        });

        assert_eq!(cpu.step(), expected);
        assert_eq!(cpu.step(), expected);
        assert!(cpu.is_jammed());

        cpu.reset();
        assert!(!cpu.is_jammed());
    }
}
