//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is implemented as a standalone function that takes a mutable reference
//! to the CPU and the decoded opcode metadata. The opcode byte has already been fetched;
//! handlers fetch their own operands through the resolver so that every bus access and
//! internal cycle is ticked in hardware order.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)
//! - **illegal**: Stable NMOS undocumented opcodes (LAX, SAX, DCP, ISC, SLO, RLA, SRE,
//!   RRA, ANC, ALR, ARR, SBX, JAM)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod illegal;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::{ExecutionError, MemoryBus, Mnemonic, OpcodeMetadata, Status, CPU};

/// Dispatches a fetched opcode to its handler.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    use Mnemonic::*;

    match op.mnemonic {
        // Load / store
        Lda => load_store::execute_lda(cpu, op),
        Ldx => load_store::execute_ldx(cpu, op),
        Ldy => load_store::execute_ldy(cpu, op),
        Sta => load_store::execute_sta(cpu, op),
        Stx => load_store::execute_stx(cpu, op),
        Sty => load_store::execute_sty(cpu, op),

        // Transfers
        Tax => transfer::execute_tax(cpu, op),
        Tay => transfer::execute_tay(cpu, op),
        Txa => transfer::execute_txa(cpu, op),
        Tya => transfer::execute_tya(cpu, op),
        Tsx => transfer::execute_tsx(cpu, op),
        Txs => transfer::execute_txs(cpu, op),

        // Stack
        Pha => stack::execute_pha(cpu, op),
        Php => stack::execute_php(cpu, op),
        Pla => stack::execute_pla(cpu, op),
        Plp => stack::execute_plp(cpu, op),

        // Arithmetic and logic
        Adc => alu::execute_adc(cpu, op),
        Sbc => alu::execute_sbc(cpu, op),
        And => alu::execute_and(cpu, op),
        Ora => alu::execute_ora(cpu, op),
        Eor => alu::execute_eor(cpu, op),
        Cmp => alu::execute_cmp(cpu, op),
        Cpx => alu::execute_cpx(cpu, op),
        Cpy => alu::execute_cpy(cpu, op),
        Bit => alu::execute_bit(cpu, op),

        // Shifts and rotates
        Asl => shifts::execute_shift(cpu, op, shifts::asl),
        Lsr => shifts::execute_shift(cpu, op, shifts::lsr),
        Rol => shifts::execute_shift(cpu, op, shifts::rol),
        Ror => shifts::execute_shift(cpu, op, shifts::ror),

        // Increments and decrements
        Inc => inc_dec::execute_inc(cpu, op),
        Dec => inc_dec::execute_dec(cpu, op),
        Inx => inc_dec::execute_inx(cpu, op),
        Iny => inc_dec::execute_iny(cpu, op),
        Dex => inc_dec::execute_dex(cpu, op),
        Dey => inc_dec::execute_dey(cpu, op),

        // Branches
        Bcc => branches::execute_branch(cpu, op, Status::CARRY, false),
        Bcs => branches::execute_branch(cpu, op, Status::CARRY, true),
        Bne => branches::execute_branch(cpu, op, Status::ZERO, false),
        Beq => branches::execute_branch(cpu, op, Status::ZERO, true),
        Bpl => branches::execute_branch(cpu, op, Status::NEGATIVE, false),
        Bmi => branches::execute_branch(cpu, op, Status::NEGATIVE, true),
        Bvc => branches::execute_branch(cpu, op, Status::OVERFLOW, false),
        Bvs => branches::execute_branch(cpu, op, Status::OVERFLOW, true),

        // Control flow
        Jmp => control::execute_jmp(cpu, op),
        Jsr => control::execute_jsr(cpu, op),
        Rts => control::execute_rts(cpu, op),
        Rti => control::execute_rti(cpu, op),
        Brk => control::execute_brk(cpu, op),
        Nop => control::execute_nop(cpu, op),

        // Flags
        Clc => flags::execute_flag(cpu, op, Status::CARRY, false),
        Sec => flags::execute_flag(cpu, op, Status::CARRY, true),
        Cli => flags::execute_flag(cpu, op, Status::INTERRUPT_DISABLE, false),
        Sei => flags::execute_flag(cpu, op, Status::INTERRUPT_DISABLE, true),
        Cld => flags::execute_flag(cpu, op, Status::DECIMAL, false),
        Sed => flags::execute_flag(cpu, op, Status::DECIMAL, true),
        Clv => flags::execute_flag(cpu, op, Status::OVERFLOW, false),

        // Undocumented
        Lax => illegal::execute_lax(cpu, op),
        Sax => illegal::execute_sax(cpu, op),
        Dcp => illegal::execute_dcp(cpu, op),
        Isc => illegal::execute_isc(cpu, op),
        Slo => illegal::execute_slo(cpu, op),
        Rla => illegal::execute_rla(cpu, op),
        Sre => illegal::execute_sre(cpu, op),
        Rra => illegal::execute_rra(cpu, op),
        Anc => illegal::execute_anc(cpu, op),
        Alr => illegal::execute_alr(cpu, op),
        Arr => illegal::execute_arr(cpu, op),
        Sbx => illegal::execute_sbx(cpu, op),
        Jam => illegal::execute_jam(cpu, opcode),

        // Unstable: `CPU::step` rejects these before dispatch
        Xaa | Lxa | Ahx | Tas | Shx | Shy | Las => Err(crate::addressing::invalid_mode(op)),
    }
}

/// Internal cycle of a one-byte instruction (the discarded read of the next byte).
#[inline]
pub(crate) fn implied<M: MemoryBus>(
    cpu: &mut CPU<M>,
    op: &OpcodeMetadata,
) -> Result<(), ExecutionError> {
    if op.addressing_mode != crate::AddressingMode::Implied {
        return Err(crate::addressing::invalid_mode(op));
    }
    cpu.tick();
    Ok(())
}
