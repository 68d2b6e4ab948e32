//! # Processor Status Register (P)
//!
//! The status register packs seven flags and one always-set bit into a byte.
//! Flags are read and written individually but stored packed, so every
//! update is a true bitwise set or clear of a single bit.
//!
//! | Bit | Mask | Name              | Description                                   |
//! |-----|------|-------------------|-----------------------------------------------|
//! | 7   | 0x80 | NEGATIVE          | Bit 7 of the last result                      |
//! | 6   | 0x40 | OVERFLOW          | Signed overflow from ADC/SBC, bit 6 from BIT  |
//! | 5   | 0x20 | UNUSED            | Always 1                                      |
//! | 4   | 0x10 | BREAK             | Only exists in copies pushed by BRK/PHP       |
//! | 3   | 0x08 | DECIMAL           | BCD arithmetic for ADC/SBC                    |
//! | 2   | 0x04 | INTERRUPT_DISABLE | Masks IRQ                                     |
//! | 1   | 0x02 | ZERO              | Last result was zero                          |
//! | 0   | 0x01 | CARRY             | Unsigned carry out / no borrow                |

use bitflags::bitflags;

bitflags! {
    /// Packed 6502 processor status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry Flag
        const CARRY = 0b0000_0001;
        /// Zero Flag
        const ZERO = 0b0000_0010;
        /// Interrupt Disable
        const INTERRUPT_DISABLE = 0b0000_0100;
        /// Decimal Mode
        const DECIMAL = 0b0000_1000;
        /// Break Command (pushed copies only)
        const BREAK = 0b0001_0000;
        /// Unused (always 1)
        const UNUSED = 0b0010_0000;
        /// Overflow Flag
        const OVERFLOW = 0b0100_0000;
        /// Negative Flag
        const NEGATIVE = 0b1000_0000;
    }
}

impl Status {
    /// Power-on / reset value: only UNUSED and INTERRUPT_DISABLE set.
    pub const POWER_ON: Status = Status::UNUSED.union(Status::INTERRUPT_DISABLE);

    /// Returns whether `flag` is set.
    pub fn get(self, flag: Status) -> bool {
        self.contains(flag)
    }

    /// Sets the Zero and Negative flags from `value`.
    ///
    /// Z is set iff the value is zero and N iff bit 7 is set; the previous
    /// state of both flags is irrelevant.
    pub fn set_zn(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Byte pushed to the stack by PHP, BRK and interrupt entry.
    ///
    /// UNUSED is always set; BREAK is set iff `brk`.
    pub fn for_push(self, brk: bool) -> u8 {
        let mut pushed = self | Status::UNUSED;
        pushed.set(Status::BREAK, brk);
        pushed.bits()
    }

    /// Register value restored from a byte pulled by PLP or RTI.
    ///
    /// Every flag bit is taken verbatim. BREAK is dropped because the
    /// register has no storage for it, and UNUSED reads back as 1.
    pub fn from_pulled(byte: u8) -> Status {
        (Status::from_bits_retain(byte) - Status::BREAK) | Status::UNUSED
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::POWER_ON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear_single_bit() {
        let mut p = Status::from_bits_retain(0xFF);
        p.set(Status::CARRY, false);
        assert_eq!(p.bits(), 0xFE);

        p.set(Status::CARRY, true);
        assert_eq!(p.bits(), 0xFF);

        let mut p = Status::empty();
        p.set(Status::OVERFLOW, true);
        assert_eq!(p.bits(), 0x40);
        assert!(p.get(Status::OVERFLOW));
        assert!(!p.get(Status::NEGATIVE));
    }

    #[test]
    fn test_set_zn() {
        let mut p = Status::POWER_ON | Status::NEGATIVE;
        p.set_zn(0x00);
        assert!(p.get(Status::ZERO));
        assert!(!p.get(Status::NEGATIVE));

        p.set_zn(0x80);
        assert!(!p.get(Status::ZERO));
        assert!(p.get(Status::NEGATIVE));

        p.set_zn(0x7F);
        assert!(!p.get(Status::ZERO));
        assert!(!p.get(Status::NEGATIVE));

        // Other flags untouched
        assert!(p.get(Status::INTERRUPT_DISABLE));
        assert!(p.get(Status::UNUSED));
    }

    #[test]
    fn test_for_push() {
        let p = Status::CARRY;
        assert_eq!(p.for_push(true), 0x31);
        assert_eq!(p.for_push(false), 0x21);
    }

    #[test]
    fn test_from_pulled() {
        let p = Status::from_pulled(0xFF);
        assert_eq!(p.bits(), 0xEF);

        let p = Status::from_pulled(0x00);
        assert_eq!(p.bits(), 0x20);

        let p = Status::from_pulled(0xC3);
        assert_eq!(p.bits(), 0xE3);
    }
}
