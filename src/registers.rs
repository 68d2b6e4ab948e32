//! 6502 CPU registers.

use crate::status::Status;

/// Base address of the hardware stack page (0x0100-0x01FF).
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const RESET_SP: u8 = 0xFD;

/// 6502 CPU register set.
///
/// Owned by a single `CPU`; there is no shared or global register state, so
/// any number of processors can run side by side in one process.
///
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - SP: 8-bit stack pointer, offset into the stack page
/// - PC: 16-bit program counter
/// - P: packed processor status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (points to next free location).
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create registers in their power-on state.
    ///
    /// A, X and Y are zero, SP is 0xFD and only the unused and interrupt
    /// disable bits of P are set. PC stays zero until the reset vector is
    /// loaded.
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0,
            p: Status::POWER_ON,
        }
    }

    /// Address the next push writes to; SP moves down afterwards.
    pub fn push_addr(&mut self) -> u16 {
        let addr = self.stack_addr();
        self.sp = self.sp.wrapping_sub(1);
        addr
    }

    /// Address the next pull reads from; SP moves up first.
    pub fn pull_addr(&mut self) -> u16 {
        self.sp = self.sp.wrapping_add(1);
        self.stack_addr()
    }

    /// Current stack address without modifying SP.
    pub const fn stack_addr(&self) -> u16 {
        STACK_BASE | (self.sp as u16)
    }
}
