//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that serves as the
//! single source of truth for decoding. The CPU looks up every fetched opcode here and
//! dispatches on the mnemonic, so decoding is one array index.
//!
//! The table covers:
//! - **151 documented instructions** - Official NMOS 6502 opcodes
//! - **105 undocumented opcodes** - Named after their common NMOS behavior and marked
//!   `documented: false`; whether they execute is decided by
//!   [`UndefinedOpcodePolicy`](crate::UndefinedOpcodePolicy)

use std::fmt;

use crate::addressing::AddressingMode;

/// Instruction mnemonic.
///
/// The first 56 variants are the documented NMOS instruction set; the rest
/// name undocumented opcodes.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,

    // Stable undocumented opcodes
    Slo, Rla, Sre, Rra, Sax, Lax, Dcp, Isc, Anc, Alr, Arr, Sbx, Jam,

    // Unstable undocumented opcodes (analog effects, never executed)
    Xaa, Lxa, Ahx, Tas, Shx, Shy, Las,
}

impl Mnemonic {
    /// Upper-case assembler name, e.g. `"LDA"`.
    #[rustfmt::skip]
    pub const fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA",
            Slo => "SLO", Rla => "RLA", Sre => "SRE", Rra => "RRA", Sax => "SAX",
            Lax => "LAX", Dcp => "DCP", Isc => "ISC", Anc => "ANC", Alr => "ALR",
            Arr => "ARR", Sbx => "SBX", Jam => "JAM",
            Xaa => "XAA", Lxa => "LXA", Ahx => "AHX", Tas => "TAS", Shx => "SHX",
            Shy => "SHY", Las => "LAS",
        }
    }

    /// True for opcodes whose result depends on analog chip behavior.
    pub const fn is_unstable(self) -> bool {
        matches!(
            self,
            Mnemonic::Xaa
                | Mnemonic::Lxa
                | Mnemonic::Ahx
                | Mnemonic::Tas
                | Mnemonic::Shx
                | Mnemonic::Shy
                | Mnemonic::Las
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use lib6502::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert!(lda_imm.documented);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Cycle cost excluding the page-cross and branch-taken penalties.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Whether this opcode is part of the documented instruction set.
    pub documented: bool,
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode: mode,
        base_cycles: cycles,
        size_bytes: 1 + mode.operand_bytes(),
        documented: true,
    }
}

const fn un(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        documented: false,
        ..op(mnemonic, mode, cycles)
    }
}

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// ```
/// use lib6502::{Mnemonic, OPCODE_TABLE};
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!(brk.mnemonic, Mnemonic::Brk);
/// assert_eq!(brk.base_cycles, 7);
///
/// let jam = &OPCODE_TABLE[0x02];
/// assert_eq!(jam.mnemonic, Mnemonic::Jam);
/// assert!(!jam.documented);
/// ```
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;
    [
        // 0x00
        op(Brk, Implied, 7),     op(Ora, IndirectX, 6), un(Jam, Implied, 2),   un(Slo, IndirectX, 8),
        un(Nop, ZeroPage, 3),    op(Ora, ZeroPage, 3),  op(Asl, ZeroPage, 5),  un(Slo, ZeroPage, 5),
        op(Php, Implied, 3),     op(Ora, Immediate, 2), op(Asl, Accumulator, 2), un(Anc, Immediate, 2),
        un(Nop, Absolute, 4),    op(Ora, Absolute, 4),  op(Asl, Absolute, 6),  un(Slo, Absolute, 6),
        // 0x10
        op(Bpl, Relative, 2),    op(Ora, IndirectY, 5), un(Jam, Implied, 2),   un(Slo, IndirectY, 8),
        un(Nop, ZeroPageX, 4),   op(Ora, ZeroPageX, 4), op(Asl, ZeroPageX, 6), un(Slo, ZeroPageX, 6),
        op(Clc, Implied, 2),     op(Ora, AbsoluteY, 4), un(Nop, Implied, 2),   un(Slo, AbsoluteY, 7),
        un(Nop, AbsoluteX, 4),   op(Ora, AbsoluteX, 4), op(Asl, AbsoluteX, 7), un(Slo, AbsoluteX, 7),
        // 0x20
        op(Jsr, Absolute, 6),    op(And, IndirectX, 6), un(Jam, Implied, 2),   un(Rla, IndirectX, 8),
        op(Bit, ZeroPage, 3),    op(And, ZeroPage, 3),  op(Rol, ZeroPage, 5),  un(Rla, ZeroPage, 5),
        op(Plp, Implied, 4),     op(And, Immediate, 2), op(Rol, Accumulator, 2), un(Anc, Immediate, 2),
        op(Bit, Absolute, 4),    op(And, Absolute, 4),  op(Rol, Absolute, 6),  un(Rla, Absolute, 6),
        // 0x30
        op(Bmi, Relative, 2),    op(And, IndirectY, 5), un(Jam, Implied, 2),   un(Rla, IndirectY, 8),
        un(Nop, ZeroPageX, 4),   op(And, ZeroPageX, 4), op(Rol, ZeroPageX, 6), un(Rla, ZeroPageX, 6),
        op(Sec, Implied, 2),     op(And, AbsoluteY, 4), un(Nop, Implied, 2),   un(Rla, AbsoluteY, 7),
        un(Nop, AbsoluteX, 4),   op(And, AbsoluteX, 4), op(Rol, AbsoluteX, 7), un(Rla, AbsoluteX, 7),
        // 0x40
        op(Rti, Implied, 6),     op(Eor, IndirectX, 6), un(Jam, Implied, 2),   un(Sre, IndirectX, 8),
        un(Nop, ZeroPage, 3),    op(Eor, ZeroPage, 3),  op(Lsr, ZeroPage, 5),  un(Sre, ZeroPage, 5),
        op(Pha, Implied, 3),     op(Eor, Immediate, 2), op(Lsr, Accumulator, 2), un(Alr, Immediate, 2),
        op(Jmp, Absolute, 3),    op(Eor, Absolute, 4),  op(Lsr, Absolute, 6),  un(Sre, Absolute, 6),
        // 0x50
        op(Bvc, Relative, 2),    op(Eor, IndirectY, 5), un(Jam, Implied, 2),   un(Sre, IndirectY, 8),
        un(Nop, ZeroPageX, 4),   op(Eor, ZeroPageX, 4), op(Lsr, ZeroPageX, 6), un(Sre, ZeroPageX, 6),
        op(Cli, Implied, 2),     op(Eor, AbsoluteY, 4), un(Nop, Implied, 2),   un(Sre, AbsoluteY, 7),
        un(Nop, AbsoluteX, 4),   op(Eor, AbsoluteX, 4), op(Lsr, AbsoluteX, 7), un(Sre, AbsoluteX, 7),
        // 0x60
        op(Rts, Implied, 6),     op(Adc, IndirectX, 6), un(Jam, Implied, 2),   un(Rra, IndirectX, 8),
        un(Nop, ZeroPage, 3),    op(Adc, ZeroPage, 3),  op(Ror, ZeroPage, 5),  un(Rra, ZeroPage, 5),
        op(Pla, Implied, 4),     op(Adc, Immediate, 2), op(Ror, Accumulator, 2), un(Arr, Immediate, 2),
        op(Jmp, Indirect, 5),    op(Adc, Absolute, 4),  op(Ror, Absolute, 6),  un(Rra, Absolute, 6),
        // 0x70
        op(Bvs, Relative, 2),    op(Adc, IndirectY, 5), un(Jam, Implied, 2),   un(Rra, IndirectY, 8),
        un(Nop, ZeroPageX, 4),   op(Adc, ZeroPageX, 4), op(Ror, ZeroPageX, 6), un(Rra, ZeroPageX, 6),
        op(Sei, Implied, 2),     op(Adc, AbsoluteY, 4), un(Nop, Implied, 2),   un(Rra, AbsoluteY, 7),
        un(Nop, AbsoluteX, 4),   op(Adc, AbsoluteX, 4), op(Ror, AbsoluteX, 7), un(Rra, AbsoluteX, 7),
        // 0x80
        un(Nop, Immediate, 2),   op(Sta, IndirectX, 6), un(Nop, Immediate, 2), un(Sax, IndirectX, 6),
        op(Sty, ZeroPage, 3),    op(Sta, ZeroPage, 3),  op(Stx, ZeroPage, 3),  un(Sax, ZeroPage, 3),
        op(Dey, Implied, 2),     un(Nop, Immediate, 2), op(Txa, Implied, 2),   un(Xaa, Immediate, 2),
        op(Sty, Absolute, 4),    op(Sta, Absolute, 4),  op(Stx, Absolute, 4),  un(Sax, Absolute, 4),
        // 0x90
        op(Bcc, Relative, 2),    op(Sta, IndirectY, 6), un(Jam, Implied, 2),   un(Ahx, IndirectY, 6),
        op(Sty, ZeroPageX, 4),   op(Sta, ZeroPageX, 4), op(Stx, ZeroPageY, 4), un(Sax, ZeroPageY, 4),
        op(Tya, Implied, 2),     op(Sta, AbsoluteY, 5), op(Txs, Implied, 2),   un(Tas, AbsoluteY, 5),
        un(Shy, AbsoluteX, 5),   op(Sta, AbsoluteX, 5), un(Shx, AbsoluteY, 5), un(Ahx, AbsoluteY, 5),
        // 0xA0
        op(Ldy, Immediate, 2),   op(Lda, IndirectX, 6), op(Ldx, Immediate, 2), un(Lax, IndirectX, 6),
        op(Ldy, ZeroPage, 3),    op(Lda, ZeroPage, 3),  op(Ldx, ZeroPage, 3),  un(Lax, ZeroPage, 3),
        op(Tay, Implied, 2),     op(Lda, Immediate, 2), op(Tax, Implied, 2),   un(Lxa, Immediate, 2),
        op(Ldy, Absolute, 4),    op(Lda, Absolute, 4),  op(Ldx, Absolute, 4),  un(Lax, Absolute, 4),
        // 0xB0
        op(Bcs, Relative, 2),    op(Lda, IndirectY, 5), un(Jam, Implied, 2),   un(Lax, IndirectY, 5),
        op(Ldy, ZeroPageX, 4),   op(Lda, ZeroPageX, 4), op(Ldx, ZeroPageY, 4), un(Lax, ZeroPageY, 4),
        op(Clv, Implied, 2),     op(Lda, AbsoluteY, 4), op(Tsx, Implied, 2),   un(Las, AbsoluteY, 4),
        op(Ldy, AbsoluteX, 4),   op(Lda, AbsoluteX, 4), op(Ldx, AbsoluteY, 4), un(Lax, AbsoluteY, 4),
        // 0xC0
        op(Cpy, Immediate, 2),   op(Cmp, IndirectX, 6), un(Nop, Immediate, 2), un(Dcp, IndirectX, 8),
        op(Cpy, ZeroPage, 3),    op(Cmp, ZeroPage, 3),  op(Dec, ZeroPage, 5),  un(Dcp, ZeroPage, 5),
        op(Iny, Implied, 2),     op(Cmp, Immediate, 2), op(Dex, Implied, 2),   un(Sbx, Immediate, 2),
        op(Cpy, Absolute, 4),    op(Cmp, Absolute, 4),  op(Dec, Absolute, 6),  un(Dcp, Absolute, 6),
        // 0xD0
        op(Bne, Relative, 2),    op(Cmp, IndirectY, 5), un(Jam, Implied, 2),   un(Dcp, IndirectY, 8),
        un(Nop, ZeroPageX, 4),   op(Cmp, ZeroPageX, 4), op(Dec, ZeroPageX, 6), un(Dcp, ZeroPageX, 6),
        op(Cld, Implied, 2),     op(Cmp, AbsoluteY, 4), un(Nop, Implied, 2),   un(Dcp, AbsoluteY, 7),
        un(Nop, AbsoluteX, 4),   op(Cmp, AbsoluteX, 4), op(Dec, AbsoluteX, 7), un(Dcp, AbsoluteX, 7),
        // 0xE0
        op(Cpx, Immediate, 2),   op(Sbc, IndirectX, 6), un(Nop, Immediate, 2), un(Isc, IndirectX, 8),
        op(Cpx, ZeroPage, 3),    op(Sbc, ZeroPage, 3),  op(Inc, ZeroPage, 5),  un(Isc, ZeroPage, 5),
        op(Inx, Implied, 2),     op(Sbc, Immediate, 2), op(Nop, Implied, 2),   un(Sbc, Immediate, 2),
        op(Cpx, Absolute, 4),    op(Sbc, Absolute, 4),  op(Inc, Absolute, 6),  un(Isc, Absolute, 6),
        // 0xF0
        op(Beq, Relative, 2),    op(Sbc, IndirectY, 5), un(Jam, Implied, 2),   un(Isc, IndirectY, 8),
        un(Nop, ZeroPageX, 4),   op(Sbc, ZeroPageX, 4), op(Inc, ZeroPageX, 6), un(Isc, ZeroPageX, 6),
        op(Sed, Implied, 2),     op(Sbc, AbsoluteY, 4), un(Nop, Implied, 2),   un(Isc, AbsoluteY, 7),
        un(Nop, AbsoluteX, 4),   op(Sbc, AbsoluteX, 4), op(Inc, AbsoluteX, 7), un(Isc, AbsoluteX, 7),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_count() {
        let documented = OPCODE_TABLE.iter().filter(|m| m.documented).count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn test_mnemonic_display() {
        assert_eq!(Mnemonic::Lda.to_string(), "LDA");
        assert_eq!(Mnemonic::Isc.to_string(), "ISC");
    }

    #[test]
    fn test_unstable_mnemonics_are_undocumented() {
        for metadata in OPCODE_TABLE.iter() {
            if metadata.mnemonic.is_unstable() {
                assert!(!metadata.documented);
            }
        }
    }
}
