//! # Addressing Modes
//!
//! This module defines the addressing modes supported by the 6502 processor and
//! the resolver that turns a mode into an operand. Resolving consumes the operand
//! bytes after the opcode (advancing PC) and charges the mode's extra cycles on
//! the bus as it goes:
//!
//! | Mode        | Bytes | Extra ticks                                    |
//! |-------------|-------|------------------------------------------------|
//! | ZeroPageX/Y | 1     | 1 (index addition)                             |
//! | AbsoluteX/Y | 2     | 1 on page cross (always for stores and RMW)    |
//! | IndirectX   | 1     | 1 (index addition)                             |
//! | IndirectY   | 1     | 1 on page cross (always for stores and RMW)    |
//!
//! The taken-branch penalty of `Relative` is charged by the branch itself,
//! since only the branch knows whether it is taken.
//!
//! The resolver and its operand types are internal; hosts only see the mode tag.
//!
//! ```compile_fail
//! use lib6502::addressing::Operand;
//! ```
//!
//! ```compile_fail
//! use lib6502::Access;
//! ```

use crate::opcodes::OpcodeMetadata;
use crate::status::Status;
use crate::{ExecutionError, MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset from the address of the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($1234). The pointer's high byte is always read from the
    /// same page as its low byte, so JMP ($10FF) reads $10FF and $1000.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// True for modes that locate a data byte in memory.
    pub const fn is_data_address(self) -> bool {
        matches!(
            self,
            AddressingMode::ZeroPage
                | AddressingMode::ZeroPageX
                | AddressingMode::ZeroPageY
                | AddressingMode::Absolute
                | AddressingMode::AbsoluteX
                | AddressingMode::AbsoluteY
                | AddressingMode::IndirectX
                | AddressingMode::IndirectY
        )
    }
}

/// Result of resolving an addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand.
    Implied,
    /// The accumulator itself.
    Accumulator,
    /// The fetched byte is the operand.
    Immediate(u8),
    /// Effective address (branch target for `Relative`, jump target for `Indirect`).
    Address(u16),
}

/// How an instruction uses its effective address.
///
/// Indexed modes only pay the page-cross cycle on reads; stores and
/// read-modify-write instructions always spend it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
    Modify,
}

/// Returns true if two addresses lie in different 256-byte pages.
#[inline]
pub const fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl<M: MemoryBus> CPU<M> {
    /// Resolves `mode` into an operand, consuming operand bytes and charging
    /// the mode's extra ticks.
    pub(crate) fn resolve(&mut self, mode: AddressingMode, access: Access) -> Operand {
        match mode {
            AddressingMode::Implied => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.fetch_byte()),
            AddressingMode::ZeroPage => Operand::Address(self.fetch_byte() as u16),
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte();
                self.tick();
                Operand::Address(base.wrapping_add(self.regs.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte();
                self.tick();
                Operand::Address(base.wrapping_add(self.regs.y) as u16)
            }
            AddressingMode::Relative => {
                let offset = self.fetch_byte() as i8;
                Operand::Address(self.regs.pc.wrapping_add_signed(offset as i16))
            }
            AddressingMode::Absolute => Operand::Address(self.fetch_word()),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                Operand::Address(self.index(base, self.regs.x, access))
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                Operand::Address(self.index(base, self.regs.y, access))
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                let lo = self.read(pointer);
                // High byte never leaves the pointer's page
                let hi = self.read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
                Operand::Address(u16::from_le_bytes([lo, hi]))
            }
            AddressingMode::IndirectX => {
                let base = self.fetch_byte();
                self.tick();
                let pointer = base.wrapping_add(self.regs.x);
                Operand::Address(self.read_zero_page_word(pointer))
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte();
                let base = self.read_zero_page_word(pointer);
                Operand::Address(self.index(base, self.regs.y, access))
            }
        }
    }

    /// Reads the operand value of a read-type instruction.
    pub(crate) fn read_operand(&mut self, op: &OpcodeMetadata) -> Result<u8, ExecutionError> {
        let mode = op.addressing_mode;
        if mode != AddressingMode::Immediate && !mode.is_data_address() {
            return Err(invalid_mode(op));
        }

        match self.resolve(mode, Access::Read) {
            Operand::Immediate(value) => Ok(value),
            Operand::Address(addr) => Ok(self.read(addr)),
            Operand::Implied | Operand::Accumulator => Err(invalid_mode(op)),
        }
    }

    /// Resolves the effective address of a store or read-modify-write instruction.
    pub(crate) fn operand_address(
        &mut self,
        op: &OpcodeMetadata,
        access: Access,
    ) -> Result<u16, ExecutionError> {
        if !op.addressing_mode.is_data_address() {
            return Err(invalid_mode(op));
        }

        match self.resolve(op.addressing_mode, access) {
            Operand::Address(addr) => Ok(addr),
            _ => Err(invalid_mode(op)),
        }
    }

    /// Read-modify-write cycle on the operand address: read, one internal
    /// cycle, write back. Returns the value written.
    pub(crate) fn modify(
        &mut self,
        op: &OpcodeMetadata,
        f: impl FnOnce(&mut Status, u8) -> u8,
    ) -> Result<u8, ExecutionError> {
        let addr = self.operand_address(op, Access::Modify)?;
        let value = self.read(addr);
        self.tick();
        let result = f(&mut self.regs.p, value);
        self.write(addr, result);
        Ok(result)
    }

    /// Adds an index register to a 16-bit base, charging the fixup cycle.
    fn index(&mut self, base: u16, index: u8, access: Access) -> u16 {
        let addr = base.wrapping_add(index as u16);
        if access != Access::Read || page_crossed(base, addr) {
            self.tick();
        }
        addr
    }

    /// Reads a little-endian pointer from zero page, wrapping at 0xFF.
    fn read_zero_page_word(&mut self, pointer: u8) -> u16 {
        let lo = self.read(pointer as u16);
        let hi = self.read(pointer.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }
}

pub(crate) fn invalid_mode(op: &OpcodeMetadata) -> ExecutionError {
    ExecutionError::InvalidAddressingMode {
        mnemonic: op.mnemonic,
        mode: op.addressing_mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_bytes() {
        assert_eq!(AddressingMode::Implied.operand_bytes(), 0);
        assert_eq!(AddressingMode::Accumulator.operand_bytes(), 0);
        assert_eq!(AddressingMode::Relative.operand_bytes(), 1);
        assert_eq!(AddressingMode::IndirectY.operand_bytes(), 1);
        assert_eq!(AddressingMode::Indirect.operand_bytes(), 2);
        assert_eq!(AddressingMode::AbsoluteX.operand_bytes(), 2);
    }

    #[test]
    fn test_page_crossed() {
        assert!(!page_crossed(0x1200, 0x12FF));
        assert!(page_crossed(0x12FF, 0x1300));
        assert!(page_crossed(0xFFFF, 0x0000));
    }

    #[test]
    fn test_data_address_modes() {
        assert!(AddressingMode::ZeroPage.is_data_address());
        assert!(AddressingMode::IndirectY.is_data_address());
        assert!(!AddressingMode::Immediate.is_data_address());
        assert!(!AddressingMode::Relative.is_data_address());
        assert!(!AddressingMode::Indirect.is_data_address());
        assert!(!AddressingMode::Accumulator.is_data_address());
    }
}
